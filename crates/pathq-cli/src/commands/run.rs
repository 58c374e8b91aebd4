use std::io::{self, Write};
use std::path::PathBuf;

use pathq_lang::{Env, Interpreter};

use super::common::{fail, load_script};

pub struct RunArgs {
    pub script_path: Option<PathBuf>,
    pub script_text: Option<String>,
    pub color: bool,
}

pub fn run(args: RunArgs) {
    let source = load_script(args.script_path.as_deref(), args.script_text.as_deref())
        .unwrap_or_else(|msg| fail(msg));

    let program = match pathq_lang::check(&source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", err.render(&source, args.color));
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(stdout.lock());
    let result = interpreter.run(&program, Env::new());
    let _ = interpreter.into_output().flush();

    if let Err(err) = result {
        let err = pathq_lang::Error::from(err);
        eprintln!("{}", err.render(&source, args.color));
        std::process::exit(1);
    }
}
