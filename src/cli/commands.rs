//! Command implementations for the Colloquy CLI.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, bail};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chatbot::Chatbot;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ChatbotConfig;
use crate::intent::{load_intents, try_load_intents, try_load_table};

/// Words that end an interactive session.
const QUIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Execute a CLI command.
pub fn execute_command(args: ColloquyArgs) -> anyhow::Result<()> {
    match &args.command {
        Command::Chat(chat_args) => chat(chat_args.clone(), &args),
        Command::Ask(ask_args) => ask(ask_args.clone(), &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Validate(validate_args) => validate(validate_args.clone(), &args),
    }
}

/// Load the configuration named on the command line, or the defaults.
fn load_config(cli_args: &ColloquyArgs) -> anyhow::Result<ChatbotConfig> {
    match &cli_args.config {
        Some(path) => ChatbotConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(ChatbotConfig::default()),
    }
}

/// Load the intents and train a chatbot on them.
fn build_chatbot(intents_path: &Path, cli_args: &ColloquyArgs) -> anyhow::Result<Chatbot> {
    let config = load_config(cli_args)?;

    let intents = load_intents(intents_path);
    if intents.is_empty() {
        bail!("Failed to load intents from {}", intents_path.display());
    }

    let start = Instant::now();
    let bot = Chatbot::train(intents, config).context("Failed to train the classifier")?;
    info!("Chatbot ready in {:.2?}", start.elapsed());

    Ok(bot)
}

/// Random generator for response selection.
fn response_rng(config: &ChatbotConfig) -> StdRng {
    match config.response_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Run an interactive session on standard input.
fn chat(args: ChatArgs, cli_args: &ColloquyArgs) -> anyhow::Result<()> {
    let bot = build_chatbot(&args.intents, cli_args)?;
    let mut rng = response_rng(bot.config());

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_chat(
        &bot,
        stdin.lock(),
        stdout.lock(),
        &mut rng,
        cli_args.output_format,
        cli_args.verbosity() > 0,
    )?;

    Ok(())
}

/// Read messages line by line from `input` and write replies to `output`.
///
/// The session ends at end of input or on a quit command. In JSON mode each
/// exchange is written as one [`ReplyResult`] object per line.
pub fn run_chat<R, W, G>(
    bot: &Chatbot,
    input: R,
    mut output: W,
    rng: &mut G,
    format: OutputFormat,
    prompt: bool,
) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let interactive = prompt && format == OutputFormat::Human;
    if interactive {
        writeln!(output, "Type 'quit' or 'exit' to end the conversation.")?;
    }

    let mut exchanges = 0;
    let mut lines = input.lines();
    loop {
        if interactive {
            write!(output, "You: ")?;
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let message = line.trim();
        if QUIT_COMMANDS.iter().any(|q| message.eq_ignore_ascii_case(q)) {
            break;
        }

        let reply = bot.process_message_with_rng(message, rng);
        match format {
            OutputFormat::Human => writeln!(output, "Bot: {reply}")?,
            OutputFormat::Json => {
                let result = ReplyResult {
                    message: message.to_string(),
                    reply,
                };
                writeln!(output, "{}", serde_json::to_string(&result)?)?;
            }
        }
        output.flush()?;
        exchanges += 1;
    }

    if interactive {
        writeln!(output)?;
    }
    Ok(exchanges)
}

/// Reply to a single message.
fn ask(args: AskArgs, cli_args: &ColloquyArgs) -> anyhow::Result<()> {
    let bot = build_chatbot(&args.intents, cli_args)?;
    let mut rng = response_rng(bot.config());

    let reply = bot.process_message_with_rng(&args.message, &mut rng);
    output_result(
        "Reply",
        &ReplyResult {
            message: args.message,
            reply,
        },
        cli_args,
    )?;

    Ok(())
}

/// Show the predicted intent with its ranked probabilities.
fn classify(args: ClassifyArgs, cli_args: &ColloquyArgs) -> anyhow::Result<()> {
    let bot = build_chatbot(&args.intents, cli_args)?;

    let classification = bot
        .classify(&args.message)
        .with_context(|| format!("Failed to classify {:?}", args.message))?;

    let result = match classification {
        Some(classification) => ClassificationResult {
            message: args.message,
            intent: Some(classification.label.clone()),
            confidence: Some(classification.confidence),
            ranking: classification.top(args.top).to_vec(),
        },
        None => ClassificationResult {
            message: args.message,
            intent: None,
            confidence: None,
            ranking: Vec::new(),
        },
    };

    output_result("Classification", &result, cli_args)?;

    Ok(())
}

/// Check the intents file (and table file) and print dataset statistics.
fn validate(args: ValidateArgs, cli_args: &ColloquyArgs) -> anyhow::Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Validating intents file: {}", args.intents.display());
    }

    let intents = try_load_intents(&args.intents)
        .with_context(|| format!("Invalid intents file {}", args.intents.display()))?;

    let mut stats = dataset_stats(&intents);

    if let Some(table_path) = &args.table {
        let table = try_load_table(table_path)
            .with_context(|| format!("Invalid table file {}", table_path.display()))?;
        stats.table_rows = Some(table.len());
        stats.table_columns = Some(table.columns().into_iter().map(String::from).collect());
    }

    output_result("Dataset is valid", &stats, cli_args)?;

    Ok(())
}

/// Compute statistics over freshly loaded intents.
fn dataset_stats(intents: &[crate::intent::Intent]) -> DatasetStats {
    let mut seen = BTreeSet::new();
    let mut duplicate_tags = BTreeSet::new();
    for intent in intents {
        if !seen.insert(intent.tag.as_str()) {
            duplicate_tags.insert(intent.tag.clone());
        }
    }

    DatasetStats {
        intents: intents.len(),
        distinct_tags: seen.len(),
        patterns: intents.iter().map(|i| i.patterns.len()).sum(),
        responses: intents.iter().map(|i| i.responses.len()).sum(),
        duplicate_tags: duplicate_tags.into_iter().collect(),
        tags_without_patterns: intents
            .iter()
            .filter(|i| i.patterns.is_empty())
            .map(|i| i.tag.clone())
            .collect(),
        tags_without_responses: intents
            .iter()
            .filter(|i| i.responses.is_empty())
            .map(|i| i.tag.clone())
            .collect(),
        table_rows: None,
        table_columns: None,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;
    use crate::intent::Intent;
    use crate::response::NOT_UNDERSTOOD_REPLY;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn bot() -> Chatbot {
        let intents = vec![
            Intent::new("greeting", strings(&["hello", "hi there"]), strings(&["Hi!"])),
            Intent::new("bye", strings(&["goodbye", "see you"]), strings(&["Bye!"])),
        ];
        Chatbot::train(intents, ChatbotConfig::default()).unwrap()
    }

    fn session(input: &str, format: OutputFormat, prompt: bool) -> (usize, String) {
        let bot = bot();
        let mut rng = StdRng::seed_from_u64(0);
        let mut output = Vec::new();
        let exchanges = run_chat(
            &bot,
            Cursor::new(input.as_bytes()),
            &mut output,
            &mut rng,
            format,
            prompt,
        )
        .unwrap();
        (exchanges, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_chat_session() {
        let (exchanges, text) = session("hello\n\nsee you\n", OutputFormat::Human, false);
        assert_eq!(exchanges, 3);
        assert_eq!(
            text,
            format!("Bot: Hi!\nBot: {NOT_UNDERSTOOD_REPLY}\nBot: Bye!\n")
        );
    }

    #[test]
    fn test_chat_quit() {
        let (exchanges, text) = session("hello\nQuit\nsee you\n", OutputFormat::Human, false);
        assert_eq!(exchanges, 1);
        assert_eq!(text, "Bot: Hi!\n");
    }

    #[test]
    fn test_chat_prompts() {
        let (_, text) = session("hello\n", OutputFormat::Human, true);
        assert!(text.starts_with("Type 'quit'"));
        assert!(text.contains("You: Bot: Hi!\n"));
    }

    #[test]
    fn test_chat_json_lines() {
        let (exchanges, text) = session("hi there\n", OutputFormat::Json, true);
        assert_eq!(exchanges, 1);
        assert_eq!(text, "{\"message\":\"hi there\",\"reply\":\"Hi!\"}\n");
    }

    #[test]
    fn test_dataset_stats() {
        let intents = vec![
            Intent::new("greeting", strings(&["hello"]), strings(&["Hi!", "Hey!"])),
            Intent::new("silent", strings(&["shh"]), Vec::new()),
            Intent::new("empty", Vec::new(), strings(&["..."])),
            Intent::new("greeting", strings(&["hey"]), Vec::new()),
        ];

        let stats = dataset_stats(&intents);
        assert_eq!(stats.intents, 4);
        assert_eq!(stats.distinct_tags, 3);
        assert_eq!(stats.patterns, 3);
        assert_eq!(stats.responses, 3);
        assert_eq!(stats.duplicate_tags, vec!["greeting".to_string()]);
        assert_eq!(stats.tags_without_patterns, vec!["empty".to_string()]);
        assert_eq!(
            stats.tags_without_responses,
            vec!["silent".to_string(), "greeting".to_string()]
        );
    }

    const INTENTS: &str = r#"{"intents": [
        {"tag": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hi!"]},
        {"tag": "bye", "patterns": ["goodbye", "see you"], "responses": ["Bye!"]}
    ]}"#;

    fn cli(argv: &[&str]) -> ColloquyArgs {
        let mut full = vec!["colloquy", "-q"];
        full.extend_from_slice(argv);
        ColloquyArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_build_chatbot_without_intents() {
        let dir = tempdir().unwrap();
        let args = cli(&["ask", "unused.json", "hello"]);

        let missing = dir.path().join("missing.json");
        let err = build_chatbot(&missing, &args).unwrap_err();
        assert!(err.to_string().contains("Failed to load intents"), "{err:#}");

        let empty = dir.path().join("empty.json");
        fs::write(&empty, r#"{"intents": []}"#).unwrap();
        let err = build_chatbot(&empty, &args).unwrap_err();
        assert!(err.to_string().contains("Failed to load intents"), "{err:#}");

        let malformed = dir.path().join("malformed.json");
        fs::write(&malformed, "{not json").unwrap();
        assert!(build_chatbot(&malformed, &args).is_err());
    }

    #[test]
    fn test_build_chatbot_with_config() {
        let dir = tempdir().unwrap();
        let intents = dir.path().join("intents.json");
        fs::write(&intents, INTENTS).unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"response_seed": 7, "svm": {"c": 2.0}}"#).unwrap();

        let config_arg = config.to_string_lossy().to_string();
        let args = cli(&["-c", &config_arg, "ask", "unused.json", "hello"]);
        let bot = build_chatbot(&intents, &args).unwrap();
        assert_eq!(bot.config().response_seed, Some(7));
        assert_eq!(bot.config().svm.c, 2.0);
        assert_eq!(bot.process_message("hello"), "Hi!");

        fs::write(&config, r#"{"min_confidence": 3.0}"#).unwrap();
        assert!(build_chatbot(&intents, &args).is_err());
    }

    #[test]
    fn test_execute_ask_and_classify() {
        let dir = tempdir().unwrap();
        let intents = dir.path().join("intents.json");
        fs::write(&intents, INTENTS).unwrap();
        let path = intents.to_string_lossy().to_string();

        execute_command(cli(&["-f", "json", "ask", &path, "hello"])).unwrap();
        execute_command(cli(&["classify", &path, "see you", "--top", "1"])).unwrap();
        execute_command(cli(&["classify", &path, "?!"])).unwrap();

        let missing = dir.path().join("missing.json").to_string_lossy().to_string();
        let err = execute_command(cli(&["ask", &missing, "hello"])).unwrap_err();
        assert!(err.to_string().contains("Failed to load intents"));
    }

    #[test]
    fn test_validate_with_table() {
        let dir = tempdir().unwrap();
        let intents = dir.path().join("intents.json");
        fs::write(&intents, INTENTS).unwrap();
        let table = dir.path().join("table.json");
        fs::write(&table, r#"{"table": [{"course": "MBA", "seats": 60}]}"#).unwrap();

        let validate_args = ValidateArgs {
            intents: intents.clone(),
            table: Some(table.clone()),
        };
        let args = cli(&["validate", "unused.json"]);
        validate(validate_args.clone(), &args).unwrap();

        fs::write(&table, r#"{"table": ["not a row"]}"#).unwrap();
        let err = validate(validate_args, &args).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid table file"));

        fs::write(&intents, r#"{"intents": [{"tag": "x"}]}"#).unwrap();
        let err = validate(
            ValidateArgs {
                intents,
                table: None,
            },
            &args,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Invalid intents file"));
    }
}
