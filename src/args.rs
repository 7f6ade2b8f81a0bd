use std::num::NonZeroUsize;

use clap::{
    Parser,
    ValueEnum,
};
use nclean::{
    SearchSort,
    DEFAULT_CHUNK_SIZE,
    DEFAULT_SEARCH_LIMIT,
};

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum ArgSort {
    Relevance,
    LastEdited,
}

impl From<ArgSort> for SearchSort {
    fn from(value: ArgSort) -> Self {
        match value {
            ArgSort::Relevance => SearchSort::Relevance,
            ArgSort::LastEdited => SearchSort::LastEdited,
        }
    }
}

/// Permanently delete every page in the trash of all your workspaces
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The `token_v2` cookie of a logged in browser session.
    /// You will be prompted for it when neither the argument nor NOTION_TOKEN is given.
    #[arg(env = "NOTION_TOKEN", hide_env_values = true, verbatim_doc_comment)]
    pub token: Option<String>,

    /// Number of pages deleted per request.
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: NonZeroUsize,

    /// Maximum number of trashed pages looked up per space.
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: NonZeroUsize,

    /// Order in which trashed pages are looked up.
    #[arg(long, value_enum, default_value_t = ArgSort::Relevance)]
    pub sort: ArgSort,

    /// Only empty the trash of the given space. Can be repeated.
    #[arg(short, long = "space")]
    pub spaces: Vec<String>,

    /// Space to use when your account does not allow listing its spaces.
    #[arg(long)]
    pub default_space: Option<String>,

    /// Do not ask for confirmation before deleting.
    #[arg(short, long)]
    pub yes: bool,

    /// Do not actually delete anything. Just list what would be deleted.
    #[arg(short, long)]
    pub dry_run: bool,

    /// Print debug logging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Number of retries after a failed request.
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    #[arg(long, hide = true, default_value = nclean::session::DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["nclean-cli", "secret"]).unwrap();
        assert_eq!(args.token.as_deref(), Some("secret"));
        assert_eq!(args.chunk_size.get(), 10);
        assert_eq!(args.limit.get(), 1000);
        assert_eq!(args.sort, ArgSort::Relevance);
        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(args.spaces.is_empty());
    }

    #[test]
    fn parses_options() {
        let args = Args::try_parse_from([
            "nclean-cli",
            "secret",
            "--chunk-size",
            "25",
            "--sort",
            "last-edited",
            "-s",
            "s1",
            "-s",
            "s2",
            "--yes",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.chunk_size.get(), 25);
        assert_eq!(SearchSort::from(args.sort), SearchSort::LastEdited);
        assert_eq!(args.spaces, vec!["s1", "s2"]);
        assert!(args.yes);
        assert!(args.dry_run);
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert!(Args::try_parse_from(["nclean-cli", "secret", "--chunk-size", "0"]).is_err());
    }

    #[test]
    fn rejects_zero_limit() {
        assert!(Args::try_parse_from(["nclean-cli", "secret", "--limit", "0"]).is_err());

        let args = Args::try_parse_from(["nclean-cli", "secret", "--limit", "5"]).unwrap();
        assert_eq!(args.limit.get(), 5);
    }
}
