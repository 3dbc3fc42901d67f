use skiff::scanner::Scanner;
use std::{
    env,
    io::{self, Write},
};

fn main() {
    let mut stdout = io::stdout();

    let args: Vec<String> = env::args().collect();
    let result = match args.len() {
        1 => run_prompt(),
        2 => run_file(args[1].as_str()),
        _ => {
            writeln!(stdout, "Usage: skiff [script]").expect("Something went wrong");
            std::process::exit(64);
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(74);
    }
}

fn run_file(path: &str) -> io::Result<()> {
    let contents = std::fs::read_to_string(path)?;
    let had_error = run(contents.as_str())?;
    if had_error {
        std::process::exit(65);
    }
    Ok(())
}

fn run_prompt() -> io::Result<()> {
    let mut buffer = String::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };

        // a bad line shouldn't end the session
        run(buffer.as_str())?;
    }

    Ok(())
}

fn run(source: &str) -> io::Result<bool> {
    let scanner = Scanner::new(source);
    let (tokens, errors) = scanner.scan_tokens();

    let mut stderr = io::stderr();
    for error in &errors {
        writeln!(stderr, "{}", error)?;
    }

    let mut stdout = io::stdout();
    for token in &tokens {
        writeln!(stdout, "{:?}", token)?;
    }

    Ok(!errors.is_empty())
}
