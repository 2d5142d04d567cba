use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use lawline_diff::{compute_changeset, diff_change, diff_words, TokenKind, WordDiff};
use lawline_replay::{Reconstructor, TimelineIndex, TimelineValidator};
use lawline_types::{ArticleChange, LawState, Timeline};
use serde::Serialize;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Compute(args) => cmd_compute(args, cli.format),
        Command::Reconstruct(args) => cmd_reconstruct(args, cli.format, &config),
        Command::Words(args) => cmd_words(args, cli.format),
        Command::Validate(args) => cmd_validate(args, cli.format),
        Command::Log(args) => cmd_log(args, cli.format, &config),
    }
}

fn read_state(path: &Path) -> anyhow::Result<LawState> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decoding law state {}", path.display()))
}

fn read_timeline(path: &Path) -> anyhow::Result<Timeline> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Timeline::from_json(&text).with_context(|| format!("decoding timeline {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_diff(diff: &WordDiff) -> String {
    diff.tokens
        .iter()
        .map(|t| match t.kind {
            TokenKind::Unchanged => t.text.normal().to_string(),
            TokenKind::Added => t.text.green().underline().to_string(),
            TokenKind::Removed => t.text.red().strikethrough().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn cmd_compute(args: ComputeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old = read_state(&args.old)?;
    let new = read_state(&args.new)?;
    let result = compute_changeset(&old.sections, &new.sections);
    let warning = result.warning();
    let stats = result.stats;
    let is_consistent = result.is_consistent;
    let change_set = result.into_change_set(args.base_ref, args.result_ref);

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "change_set": change_set,
            "stats": stats,
            "is_consistent": is_consistent,
            "warning": warning,
        }));
    }

    println!(
        "{} {} → {}",
        "Change set".bold(),
        change_set.base_ref.yellow(),
        change_set.result_ref.yellow()
    );
    for change in change_set.changes() {
        let label = match change {
            ArticleChange::Repeal { .. } => "repeal    ".red(),
            ArticleChange::Substitute { .. } => "substitute".yellow(),
            ArticleChange::Renumber { .. } => "renumber  ".blue(),
            ArticleChange::Insert { .. } => "insert    ".green(),
        };
        let anchor = match change {
            ArticleChange::Insert {
                insert_after: Some(after),
                ..
            } => format!(" (after {after})"),
            ArticleChange::Insert { .. } => " (at head)".to_string(),
            _ => String::new(),
        };
        println!("  {} {}{}", label, change.section_id().to_string().bold(), anchor.dimmed());
        if let Some(diff) = diff_change(change) {
            println!("      {}", render_diff(&diff));
        }
    }
    println!(
        "  {} unchanged, {} substituted, {} inserted, {} repealed",
        stats.unchanged, stats.substituted, stats.inserted, stats.repealed
    );
    match warning {
        Some(w) => println!("{} {}", "⚠".yellow().bold(), w.yellow()),
        None => println!("{} Cross-check holds ({} → {} sections)", "✓".green().bold(), stats.old_count, stats.new_count),
    }
    Ok(())
}

fn cmd_reconstruct(
    args: ReconstructArgs,
    format: OutputFormat,
    config: &CliConfig,
) -> anyhow::Result<()> {
    if args.accumulated && !config.replay.attach_accumulated_diffs {
        bail!("--accumulated requested but accumulated diffs are disabled (replay.attach_accumulated_diffs = false)");
    }
    let timeline = read_timeline(&args.timeline)?;
    let result = Reconstructor::new(config.replay.clone()).reconstruct_timeline(&timeline, args.step)?;

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    println!("{} (step {})", result.state.title.bold(), result.target_index);
    if let Some(cs) = &result.applied_change_set {
        let vote = cs.vote.map_or_else(|| "no vote".to_string(), |v| v.to_string());
        let vote = if cs.is_rejected() { vote.red() } else { vote.green() };
        println!("  Amendment {} → {} [{}]", cs.base_ref.yellow(), cs.result_ref.yellow(), vote);
    }
    if !result.excluded_steps.is_empty() {
        let steps: Vec<String> = result.excluded_steps.iter().map(ToString::to_string).collect();
        println!("  Excluded by vote: steps {}", steps.join(", ").dimmed());
    }
    if !result.state.preface.is_empty() {
        println!("\n{}", result.state.preface.italic());
    }
    println!();
    for section in &result.state.sections {
        let marker = if result.touched_ids.contains(&section.id) { "●".cyan().bold() } else { " ".normal() };
        let heading = if section.heading.is_empty() { section.id.to_string() } else { section.heading.clone() };
        println!("{} {}", marker, heading.bold());
        let diff = result
            .accumulated_diffs
            .as_ref()
            .filter(|_| args.accumulated)
            .and_then(|diffs| diffs.get(&section.id));
        let body = match diff {
            Some(diff) => render_diff(diff),
            None => section.content.clone(),
        };
        println!("  {}", body);
    }
    for id in result.touched_ids.iter().filter(|id| !result.state.contains(id)) {
        println!("{} {} {}", "●".cyan().bold(), id.to_string().bold(), "(repealed)".red());
    }
    for warning in &result.warnings {
        println!("{} {}", "⚠".yellow().bold(), warning.to_string().yellow());
    }
    Ok(())
}

fn cmd_words(args: WordsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let diff = diff_words(&args.old, &args.new);
    if format == OutputFormat::Json {
        return print_json(&diff);
    }
    println!("{}", render_diff(&diff));
    println!(
        "  {} added, {} removed",
        diff.additions().to_string().green(),
        diff.removals().to_string().red()
    );
    Ok(())
}

fn cmd_validate(args: ValidateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let timeline = read_timeline(&args.timeline)?;
    let report = TimelineValidator::validate(&timeline);

    if format == OutputFormat::Json {
        print_json(&report)?;
    } else if report.is_valid() {
        println!("{} Timeline valid", "✓".green().bold());
        println!("  Steps: {} ({} snapshots, {} amendments)", report.step_count, report.snapshot_count, report.amendment_count);
    } else {
        for v in &report.violations {
            println!("{} step {}: {}", "✗".red().bold(), v.step, v.description);
        }
    }

    if !report.is_valid() {
        bail!("timeline has {} violation(s)", report.violations.len());
    }
    Ok(())
}

fn cmd_log(args: LogArgs, format: OutputFormat, config: &CliConfig) -> anyhow::Result<()> {
    let timeline = read_timeline(&args.timeline)?;
    let index = TimelineIndex::build(&timeline, &config.replay);

    if format == OutputFormat::Json {
        return print_json(&index);
    }

    for entry in &index.entries {
        let status = if entry.in_lineage { "✓".green() } else { "·".dimmed() };
        println!(
            "{} {}  {}  {}",
            status,
            format!("#{}", entry.index).yellow(),
            entry.kind.to_string().cyan(),
            entry.summary
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use lawline_replay::ReplayConfig;
    use lawline_types::SectionId;

    use super::*;

    fn demo_timeline() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/timeline.json")
    }

    #[test]
    fn demo_timeline_reconstructs() {
        let timeline = read_timeline(&demo_timeline()).unwrap();
        let result = Reconstructor::new(ReplayConfig::default())
            .reconstruct_timeline(&timeline, 3)
            .unwrap();

        let ids: Vec<&str> = result.state.ids().map(SectionId::as_str).collect();
        assert_eq!(ids, vec!["art_1", "art_1bis", "art_2", "art_3"]);
        assert_eq!(result.excluded_steps, vec![2]);
        assert!(result.touched_ids.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn demo_timeline_is_valid() {
        let timeline = read_timeline(&demo_timeline()).unwrap();
        assert!(TimelineValidator::validate(&timeline).is_valid());
    }

    #[test]
    fn rejected_step_shows_its_repeal() {
        let timeline = read_timeline(&demo_timeline()).unwrap();
        let result = Reconstructor::default()
            .reconstruct_timeline(&timeline, 2)
            .unwrap();
        assert!(!result.state.contains(&"art_2".into()));
        assert!(result.touched_ids.contains(&SectionId::from("art_2")));
        assert!(result.applied_change_set.unwrap().is_rejected());
    }

    #[test]
    fn accumulated_flag_fails_when_diffs_disabled() {
        let config = CliConfig {
            replay: ReplayConfig {
                attach_accumulated_diffs: false,
                ..ReplayConfig::default()
            },
        };
        let args = ReconstructArgs {
            timeline: demo_timeline(),
            step: 1,
            accumulated: true,
        };
        let err = cmd_reconstruct(args, OutputFormat::Text, &config).unwrap_err();
        assert!(err.to_string().contains("accumulated diffs are disabled"));

        let args = ReconstructArgs {
            timeline: demo_timeline(),
            step: 1,
            accumulated: false,
        };
        assert!(cmd_reconstruct(args, OutputFormat::Json, &config).is_ok());
    }

    #[test]
    fn compute_from_files() {
        let mut old = tempfile::NamedTempFile::new().unwrap();
        let mut new = tempfile::NamedTempFile::new().unwrap();
        write!(old, r#"{{"sections": [{{"id": "art_1", "content": "A"}}, {{"id": "art_2", "content": "B"}}]}}"#).unwrap();
        write!(new, r#"{{"sections": [{{"id": "art_1", "content": "A"}}]}}"#).unwrap();

        let args = ComputeArgs {
            old: old.path().to_path_buf(),
            new: new.path().to_path_buf(),
            base_ref: "bill".into(),
            result_ref: "act".into(),
        };
        assert!(cmd_compute(args, OutputFormat::Json).is_ok());
    }

    #[test]
    fn undecodable_state_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = read_state(file.path()).unwrap_err();
        assert!(err.to_string().contains("decoding law state"));
    }

    #[test]
    fn invalid_timeline_fails_validate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"steps": []}}"#).unwrap();
        let args = ValidateArgs {
            timeline: file.path().to_path_buf(),
        };
        assert!(cmd_validate(args, OutputFormat::Json).is_err());
    }
}
