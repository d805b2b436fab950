use std::{collections::HashMap, fs, process::ExitCode};

use clap::Parser;
use lattice_expr::{
    interpreter::{
        ExpressionParser,
        config::ParserConfig,
        lexer::{Token, tokenize},
    },
    util::num::{format_real, parse_real_literal},
};
use tracing_subscriber::EnvFilter;

/// lattice-expr evaluates the arithmetic expressions found in accelerator
/// lattice description files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the argument as a file and evaluate it line by line, printing
    /// `line = value`. Lines of the form `name := expr` or `name = expr` bind
    /// `name` for the lines below. `!` starts a comment.
    #[arg(short, long)]
    file: bool,

    /// Bind a variable, e.g. `--var length=2.5`. May be repeated.
    #[arg(short, long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    /// Fail on identifiers that are neither constants nor variables instead
    /// of treating them as 0.0.
    #[arg(long)]
    strict: bool,

    /// Do not warn about identifiers treated as 0.0.
    #[arg(short, long)]
    quiet: bool,

    /// Print the postfix instruction sequence instead of evaluating it.
    #[arg(long)]
    postfix: bool,

    contents: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .with_target(false)
                             .init();

    let args = Args::parse();

    let config = ParserConfig::default().raise_on_unresolved(args.strict)
                                        .warn_on_unresolved(!args.quiet);
    let parser = ExpressionParser::new().with_config(config);
    let mut variables: HashMap<String, f64> = args.vars.iter().cloned().collect();

    if !args.file {
        return match run_line(&parser, &args.contents, &mut variables, args.postfix, false) {
            Ok(output) => {
                println!("{output}");
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    let Ok(script) = fs::read_to_string(&args.contents) else {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  &args.contents);
        return ExitCode::FAILURE;
    };

    let mut status = ExitCode::SUCCESS;
    for result in run_script(&parser, &script, &mut variables, args.postfix) {
        match result {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("{e}");
                status = ExitCode::FAILURE;
            },
        }
    }
    status
}

/// Evaluates a lattice-style script line by line.
///
/// Blank lines and lines starting with `!` or `//` are skipped, and anything
/// after a `!` is a comment. A trailing `;` is ignored. Assignments bind their
/// target for the lines below.
///
/// # Returns
/// One entry per evaluated line: the text to print, or the error prefixed
/// with its line number.
fn run_script(parser: &ExpressionParser,
              script: &str,
              variables: &mut HashMap<String, f64>,
              postfix: bool)
              -> Vec<Result<String, String>> {
    let mut results = Vec::new();
    for (number, line) in script.lines().enumerate() {
        let line = line.split_once('!').map_or(line, |(content, _)| content);
        let line = line.trim().trim_end_matches(';').trim_end();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let result = run_line(parser, line, variables, postfix, true);
        results.push(result.map_err(|e| format!("line {}: {e}", number + 1)));
    }
    results
}

/// Evaluates one line, binding the result when the line is an assignment.
///
/// Returns the text to print: `name = value` for assignments, or the
/// instruction sequence in postfix mode. A plain expression prints its value,
/// preceded by the expression itself when `echo` is set.
fn run_line(parser: &ExpressionParser,
            line: &str,
            variables: &mut HashMap<String, f64>,
            postfix: bool,
            echo: bool)
            -> Result<String, lattice_expr::error::Error> {
    let (target, expression) = split_assignment(line);
    let program = parser.parse(expression)?;

    if postfix {
        return Ok(match target {
                      Some(name) => format!("{name} = {program}"),
                      None => program.to_string(),
                  });
    }

    let value = parser.evaluate(&program, variables)?;
    Ok(match target {
           Some(name) => {
               variables.insert(name.to_string(), value);
               format!("{name} = {}", format_real(value))
           },
           None if echo => format!("{line} = {}", format_real(value)),
           None => format_real(value),
       })
}

/// Splits `name := expr` or `name = expr` into its target and expression.
///
/// The target must be a single identifier. Anything else is treated as a
/// plain expression and left for the parser to judge.
fn split_assignment(line: &str) -> (Option<&str>, &str) {
    let split = line.split_once(":=").or_else(|| line.split_once('='));
    match split {
        Some((name, expression)) if is_identifier(name.trim()) => (Some(name.trim()), expression.trim()),
        _ => (None, line),
    }
}

/// Whether `text` is exactly one identifier token.
fn is_identifier(text: &str) -> bool {
    matches!(tokenize(text).as_deref(), Ok([(Token::Identifier(_), _)]))
}

/// Parses a `NAME=VALUE` command line binding.
fn parse_binding(binding: &str) -> Result<(String, f64), String> {
    let (name, value) = binding.split_once('=')
                               .ok_or_else(|| format!("expected NAME=VALUE, found '{binding}'"))?;
    if !is_identifier(name.trim()) {
        return Err(format!("'{}' is not a valid variable name", name.trim()));
    }
    let value = parse_real_literal(value.trim()).ok_or_else(|| format!("'{value}' is not a number"))?;
    Ok((name.trim().to_string(), value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn script(source: &str) -> (Vec<Result<String, String>>, HashMap<String, f64>) {
        let parser = ExpressionParser::new();
        let mut variables = HashMap::new();
        let results = run_script(&parser, source, &mut variables, false);
        (results, variables)
    }

    #[test]
    fn assignment_targets_must_be_identifiers() {
        assert_eq!(split_assignment("l := 2.5"), (Some("l"), "2.5"));
        assert_eq!(split_assignment("quad.k1 = 2*pi"), (Some("quad.k1"), "2*pi"));
        assert_eq!(split_assignment("2 = 3"), (None, "2 = 3"));
        assert_eq!(split_assignment("a b = 3"), (None, "a b = 3"));
        assert_eq!(split_assignment("2*pi"), (None, "2*pi"));
    }

    #[test]
    fn bindings_are_validated() {
        assert_eq!(parse_binding("length=2.5"), Ok(("length".to_string(), 2.5)));
        assert_eq!(parse_binding(" k1 = 1d-2"), Ok(("k1".to_string(), 0.01)));
        assert!(parse_binding("length").is_err());
        assert!(parse_binding("length=abc").is_err());
        assert!(parse_binding("2=3").is_err());
    }

    #[test]
    fn bound_names_are_visible_to_later_lines() {
        let (results, variables) = script("l := 2.5\n2*pi/l\nk1 = l*2;\n");
        assert_eq!(results,
                   vec![Ok("l = 2.5".to_string()),
                        Ok("2*pi/l = 2.5132741228718345".to_string()),
                        Ok("k1 = 5.0".to_string())]);
        assert_eq!(variables.get("k1"), Some(&5.0));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let (results, _) = script("! header\n// note\n\n   \nk1 = 3*2 ! trailing\n");
        assert_eq!(results, vec![Ok("k1 = 6.0".to_string())]);
    }

    #[test]
    fn failing_lines_report_their_number() {
        let (results, variables) = script("a := 1\n2 = 3\n2*a\n");
        assert_eq!(results.len(), 3);
        assert!(results[1].as_ref().is_err_and(|e| e.starts_with("line 2: ")));
        assert_eq!(results[2], Ok("2*a = 2.0".to_string()));
        assert!(!variables.contains_key("2"));
    }

    #[test]
    fn postfix_mode_does_not_evaluate() {
        let parser = ExpressionParser::new();
        let mut variables = HashMap::new();
        let results = run_script(&parser, "k := -(a+1)", &mut variables, true);
        assert_eq!(results,
                   vec![Ok("k = <ident:a> <number:1> <operator:+> <unary_minus>".to_string())]);
        assert!(variables.is_empty());
    }

    #[test]
    fn inline_expressions_print_the_value_only() {
        let parser = ExpressionParser::new();
        let mut variables = HashMap::from([("x".to_string(), 2.0)]);
        assert_eq!(run_line(&parser, "x^3", &mut variables, false, false).unwrap(), "8.0");
        assert!(run_line(&parser, "x^", &mut variables, false, false).is_err());
    }
}
