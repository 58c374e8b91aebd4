use std::path::PathBuf;

use super::common::{fail, load_script};

pub struct CheckArgs {
    pub script_path: Option<PathBuf>,
    pub script_text: Option<String>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_script(args.script_path.as_deref(), args.script_text.as_deref())
        .unwrap_or_else(|msg| fail(msg));

    if let Err(err) = pathq_lang::check(&source) {
        eprintln!("{}", err.render(&source, args.color));
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
