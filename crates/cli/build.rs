use std::{env, fs, path::PathBuf};

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn long_arg(long: &'static str, help: &'static str) -> Arg {
    Arg::new(long).long(long).help(help)
}

fn long_flag(long: &'static str, help: &'static str) -> Arg {
    long_arg(long, help).action(ArgAction::SetTrue)
}

fn lexicon_args() -> [Arg; 3] {
    [
        long_arg("stop-words", "Stop-word directory or file (default: ./StopWords)")
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf)),
        long_arg("master-dictionary", "Master dictionary directory or file (default: ./MasterDictionary)")
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf)),
        long_flag("case-sensitive-lexicons", "Keep lexicon words as written instead of lower-casing them"),
    ]
}

fn fetch_args() -> [Arg; 3] {
    [
        arg!(--workers <NUM> "Maximum number of URLs fetched at once").default_value("6"),
        arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"),
        long_arg("user-agent", "Custom User-Agent for HTTP requests").value_name("UA"),
    ]
}

fn output_args() -> [Arg; 3] {
    [
        arg!(-o --output <FILE> "Output file (default: stdout)").value_parser(value_parser!(PathBuf)),
        arg!(-f --format <FORMAT> "Output format")
            .default_value("csv")
            .value_parser(["csv", "json"]),
        arg!(--pretty "Pretty print JSON output"),
    ]
}

fn input_arg() -> Arg {
    arg!(-i --input <CSV> "Input CSV with URL_ID and URL columns")
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

fn articles_dir_arg() -> Arg {
    long_arg("articles-dir", "Directory holding the article files")
        .value_name("DIR")
        .default_value("extracted_articles")
        .value_parser(value_parser!(PathBuf))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let exclude_title = long_flag("exclude-title", "Analyze only the article body, without its title line");

    let mut cmd = Command::new("sententia")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Sententia Contributors")
        .about("Lexicon sentiment and readability metrics for web articles")
        .arg(arg!(-v --verbose "Verbosity level (-v debug, -vv trace)").action(ArgAction::Count).global(true))
        .subcommand(
            Command::new("run")
                .about("Extract every article, score it and write the output table")
                .arg(input_arg())
                .arg(articles_dir_arg())
                .arg(exclude_title.clone())
                .args(lexicon_args())
                .args(fetch_args())
                .args(output_args()),
        )
        .subcommand(
            Command::new("extract")
                .about("Fetch every URL and write one article file per row")
                .arg(input_arg())
                .arg(articles_dir_arg())
                .args(fetch_args()),
        )
        .subcommand(
            Command::new("analyze")
                .about("Score an existing articles directory and write the output table")
                .arg(input_arg())
                .arg(articles_dir_arg())
                .arg(exclude_title.clone())
                .args(lexicon_args())
                .args(output_args()),
        )
        .subcommand(
            Command::new("score")
                .about("Score a single text (or HTML page) and print its metrics")
                .arg(arg!([INPUT] "Text file to score, or '-' for stdin").value_parser(value_parser!(PathBuf)))
                .arg(arg!(--html "Treat the input as an article page and extract it first"))
                .arg(arg!(--id <ID> "Identifier printed with the metrics"))
                .arg(exclude_title)
                .arg(
                    arg!(-f --format <FORMAT> "Output format")
                        .default_value("text")
                        .value_parser(["text", "json"]),
                )
                .args(lexicon_args()),
        )
        .subcommand(
            Command::new("completions")
                .about("Print a shell completion script")
                .arg(arg!(<SHELL> "Target shell").value_parser(["bash", "zsh", "fish", "powershell", "elvish"])),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "sententia", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "sententia", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "sententia", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "sententia", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
