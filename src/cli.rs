use crate::config::AppConfig;
use crate::error::{AppError, InputError};
use crate::telemetry;
use crate::workflows::shortlist::{
    load_collection, report, ShortlistEngine, ShortlistQuotas, ShortlistSummary,
};
use chrono::Utc;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

const ENTRY_LEVEL_PROMPT: &str = "Enter number of freshers to shortlist: ";
const SEASONED_PROMPT: &str = "Enter number of experienced candidates to shortlist: ";

#[derive(Parser, Debug, Default)]
#[command(
    name = "shortlist",
    about = "Rank candidates per hiring track and write the top-N of each to CSV",
    version
)]
pub struct ShortlistArgs {
    /// Candidate CSV to read (overrides SHORTLIST_INPUT)
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Directory receiving the two shortlist files (overrides SHORTLIST_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Number of entry-level candidates to keep; prompted for when omitted
    #[arg(long)]
    pub entry_level: Option<usize>,
    /// Number of seasoned candidates to keep; prompted for when omitted
    #[arg(long)]
    pub seasoned: Option<usize>,
    /// Console rendering of the shortlist
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub(crate) fn run() -> Result<(), AppError> {
    let args = match ShortlistArgs::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(InputError::Usage(err.to_string()).into()),
    };

    let mut config = AppConfig::load()?;
    args.apply_overrides(&mut config);
    telemetry::init(&config.telemetry)?;

    info!(
        ?config.environment,
        input = %config.shortlist.input_path.display(),
        "starting shortlist run"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(&args, &config, stdin.lock(), stdout.lock(), stderr.lock())
}

impl ShortlistArgs {
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(input) = &self.input {
            config.shortlist.input_path = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.shortlist.output_dir = output_dir.clone();
        }
    }
}

/// Loads, ranks, echoes and persists once, using the given console streams.
///
/// Quota prompts share `output` in text mode. In json mode they go to
/// `diagnostics` so `output` carries nothing but the summary document.
pub fn execute<R: BufRead, W: Write, D: Write>(
    args: &ShortlistArgs,
    config: &AppConfig,
    input: R,
    mut output: W,
    mut diagnostics: D,
) -> Result<(), AppError> {
    let settings = &config.shortlist;
    let candidates = load_collection(&settings.input_path, &settings.entry_level_marker)?;

    let prompt_output: &mut dyn Write = match args.format {
        OutputFormat::Text => &mut output,
        OutputFormat::Json => &mut diagnostics,
    };
    let mut prompt = QuotaPrompt::new(input, prompt_output);
    let entry_level = match args.entry_level {
        Some(count) => count,
        None => prompt.ask(ENTRY_LEVEL_PROMPT)?,
    };
    let seasoned = match args.seasoned {
        Some(count) => count,
        None => prompt.ask(SEASONED_PROMPT)?,
    };
    let quotas = ShortlistQuotas::new(entry_level, seasoned);

    let shortlist = ShortlistEngine::default().shortlist(&candidates, quotas);

    match args.format {
        OutputFormat::Text => {
            write!(output, "{}", report::render_text(&shortlist))?;
        }
        OutputFormat::Json => {
            let summary = ShortlistSummary::new(&shortlist, &settings.input_path, Utc::now());
            writeln!(output, "{}", serde_json::to_string_pretty(&summary)?)?;
        }
    }

    shortlist.persist(settings)?;

    if args.format == OutputFormat::Text {
        writeln!(output, "\nCSV files generated successfully.")?;
    }

    info!(
        entry_level = shortlist.entry_level.selected.len(),
        seasoned = shortlist.seasoned.selected.len(),
        "shortlist run complete"
    );
    Ok(())
}

/// Reads non-negative counts, asking again on anything else.
struct QuotaPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> QuotaPrompt<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// End of input counts as zero.
    fn ask(&mut self, prompt: &str) -> Result<usize, InputError> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                warn!(prompt = prompt.trim(), "no quota entered, defaulting to 0");
                writeln!(self.output)?;
                return Ok(0);
            }

            match line.trim().parse::<i64>() {
                Ok(count) if count >= 0 => {
                    return Ok(usize::try_from(count).unwrap_or(usize::MAX));
                }
                _ => {
                    warn!(value = line.trim(), "rejected quota input");
                    writeln!(self.output, "Please enter a whole number of zero or more.")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (usize, String) {
        let mut output = Vec::new();
        let count = QuotaPrompt::new(Cursor::new(input), &mut output)
            .ask(ENTRY_LEVEL_PROMPT)
            .expect("prompt answers");
        (count, String::from_utf8(output).expect("utf8"))
    }

    #[test]
    fn prompt_accepts_whole_number() {
        let (count, shown) = ask("3\n");
        assert_eq!(count, 3);
        assert_eq!(shown, ENTRY_LEVEL_PROMPT);
    }

    #[test]
    fn prompt_retries_on_negative_and_garbage() {
        let (count, shown) = ask("-2\nten\n 4 \n");
        assert_eq!(count, 4);
        assert_eq!(shown.matches(ENTRY_LEVEL_PROMPT).count(), 3);
        assert_eq!(shown.matches("Please enter").count(), 2);
    }

    #[test]
    fn prompt_never_yields_a_negative_quota() {
        let (count, shown) = ask("-3\n");
        assert_eq!(count, 0);
        assert_eq!(shown.matches("Please enter").count(), 1);
    }

    #[test]
    fn prompt_defaults_to_zero_at_end_of_input() {
        let (count, _) = ask("oops\n");
        assert_eq!(count, 0);
    }

    #[test]
    fn flags_parse_and_override_config() {
        let args = ShortlistArgs::try_parse_from([
            "shortlist",
            "--input",
            "people.csv",
            "--output-dir",
            "out",
            "--entry-level",
            "2",
            "--format",
            "json",
        ])
        .expect("args parse");
        assert_eq!(args.entry_level, Some(2));
        assert_eq!(args.seasoned, None);
        assert_eq!(args.format, OutputFormat::Json);

        let mut config = AppConfig {
            environment: crate::config::AppEnvironment::Test,
            shortlist: Default::default(),
            telemetry: crate::config::TelemetryConfig {
                log_level: "warn".to_string(),
            },
        };
        args.apply_overrides(&mut config);
        assert_eq!(config.shortlist.input_path, PathBuf::from("people.csv"));
        assert_eq!(config.shortlist.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn negative_flag_is_rejected() {
        let result = ShortlistArgs::try_parse_from(["shortlist", "--seasoned", "-1"]);
        assert!(result.is_err());
    }
}
