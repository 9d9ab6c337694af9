//! Command-line interface definition using clap.

use clap::Parser;

/// Convert a WhatsApp chat export into Mattermost bulk-import JSONL.
#[derive(Parser, Debug, Clone)]
#[command(name = "wa2mm")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    wa2mm chat.txt --team my-team --channel general
    wa2mm chat.txt --team my-team --channel general -o import.jsonl
    wa2mm chat.txt --team t --channel c --users '"Alice Example"="alice"'
    wa2mm chat.txt --team t --channel c --media-dir ./WhatsApp/Media"#)]
pub struct Args {
    /// Path to the WhatsApp TXT export
    pub input: String,

    /// Path to the output JSONL file
    #[arg(short, long, default_value = "data.jsonl")]
    pub output: String,

    /// Target Mattermost team name
    #[arg(long)]
    pub team: String,

    /// Target Mattermost channel name
    #[arg(long)]
    pub channel: String,

    /// Display-name mappings: '"WhatsApp Name"="mm-user";...'
    #[arg(long, value_name = "MAPPINGS", default_value = "")]
    pub users: String,

    /// Phone-number mappings: '"491701234567"="mm-user";...'
    #[arg(long, value_name = "MAPPINGS", default_value = "")]
    pub phones: String,

    /// Emoji mappings: '"🎉"=":tada:";...'
    #[arg(long, value_name = "MAPPINGS", default_value = "")]
    pub emojis: String,

    /// Media directory; referenced files are checked for existence
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<String>,

    /// Maximum message fragment length in characters
    #[arg(long, value_name = "CHARS", default_value_t = crate::splitter::DEFAULT_MAX_MESSAGE_LENGTH)]
    pub max_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_minimal() {
        let args =
            Args::parse_from(["wa2mm", "chat.txt", "--team", "my-team", "--channel", "general"]);
        assert_eq!(args.input, "chat.txt");
        assert_eq!(args.output, "data.jsonl");
        assert_eq!(args.max_length, crate::splitter::DEFAULT_MAX_MESSAGE_LENGTH);
        assert!(args.media_dir.is_none());
    }

    #[test]
    fn test_parse_full() {
        let args = Args::parse_from([
            "wa2mm",
            "chat.txt",
            "--team",
            "t",
            "--channel",
            "c",
            "-o",
            "out.jsonl",
            "--users",
            r#""Alice"="alice""#,
            "--media-dir",
            "media",
            "--max-length",
            "8000",
        ]);
        assert_eq!(args.output, "out.jsonl");
        assert_eq!(args.users, r#""Alice"="alice""#);
        assert_eq!(args.media_dir.as_deref(), Some("media"));
        assert_eq!(args.max_length, 8000);
    }
}
