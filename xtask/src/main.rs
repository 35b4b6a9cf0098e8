use std::fs;
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use fbdraw::{Diagram, NotationError, Warning};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        usage();
        return ExitCode::FAILURE;
    }

    let file = Utf8PathBuf::from(&args[2]);
    let result = match (args[1].as_str(), args.get(3)) {
        ("render", Some(out)) => render(&file, Utf8Path::new(out)),
        ("gallery", Some(out)) => gallery(&file, Utf8Path::new(out)),
        ("check", _) => check(&file),
        _ => {
            usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command> <notation-file> [out]");
    eprintln!("Commands:");
    eprintln!("  render <file> <out-dir>    Write one SVG per notation line");
    eprintln!("  gallery <file> <out.html>  Write every diagram into one HTML page");
    eprintln!("  check <file>               Report warnings and validation problems");
}

/// One notation per non-empty line; `#` starts a comment line
struct Line {
    number: usize,
    text: String,
}

fn read_lines(file: &Utf8Path) -> miette::Result<Vec<Line>> {
    let source = fs::read_to_string(file).map_err(|e| miette::miette!("reading {file}: {e}"))?;
    Ok(source
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
        .map(|(number, text)| Line {
            number,
            text: text.to_string(),
        })
        .collect())
}

fn diagram_for(line: &Line) -> Result<Diagram, NotationError> {
    let id = format!("line-{}", line.number);
    if fbdraw::compose::is_combination(&line.text) {
        return fbdraw::Composer::default()
            .parse_combination_detailed(&line.text)
            .map(|c| c.diagram);
    }
    fbdraw::parse_detailed(&line.text, &id).map(|p| p.diagram)
}

fn render(file: &Utf8Path, out_dir: &Utf8Path) -> miette::Result<bool> {
    let lines = read_lines(file)?;
    fs::create_dir_all(out_dir).map_err(|e| miette::miette!("creating {out_dir}: {e}"))?;

    let failures: Vec<String> = lines
        .par_iter()
        .filter_map(|line| {
            let path = out_dir.join(format!("{}.svg", line.number));
            let outcome = diagram_for(line)
                .map_err(|e| format!("{e}"))
                .and_then(|d| fs::write(&path, d.markup()).map_err(|e| format!("writing {path}: {e}")));
            outcome.err().map(|e| format!("{file}:{}: {e}", line.number))
        })
        .collect();

    for failure in &failures {
        eprintln!("{failure}");
    }
    eprintln!("rendered {} of {} diagrams into {out_dir}", lines.len() - failures.len(), lines.len());
    Ok(failures.is_empty())
}

fn gallery(file: &Utf8Path, out: &Utf8Path) -> miette::Result<bool> {
    let lines = read_lines(file)?;
    let cards: Vec<(String, bool)> = lines
        .par_iter()
        .map(|line| {
            let (body, ok) = match diagram_for(line) {
                Ok(d) => (d.markup(), true),
                Err(e) => (format!("<pre class=\"error\">{}</pre>", escape(&e.to_string())), false),
            };
            let card = format!(
                "<section class=\"card\">\n<h2>{}: <code>{}</code></h2>\n{}\n</section>\n",
                line.number,
                escape(&line.text),
                body
            );
            (card, ok)
        })
        .collect();

    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>fbdraw gallery</title>\n<style>\n\
         body { font-family: system-ui, sans-serif; background: #eee; margin: 24px; }\n\
         .card { background: white; border-radius: 8px; padding: 12px 16px; margin-bottom: 16px; }\n\
         .card h2 { font-size: 13px; font-weight: 600; }\n\
         .card svg { max-width: 100%; height: auto; }\n\
         .error { color: #991b1b; }\n\
         </style>\n</head>\n<body>\n",
    );
    for (card, _) in &cards {
        html.push_str(card);
    }
    html.push_str("</body>\n</html>\n");
    fs::write(out, html).map_err(|e| miette::miette!("writing {out}: {e}"))?;

    let failed = cards.iter().filter(|(_, ok)| !ok).count();
    eprintln!("wrote {} diagrams to {out} ({failed} failed)", cards.len());
    Ok(failed == 0)
}

fn check(file: &Utf8Path) -> miette::Result<bool> {
    let lines = read_lines(file)?;
    let mut clean = true;

    for line in &lines {
        if fbdraw::compose::is_combination(&line.text) {
            match fbdraw::Composer::default().parse_combination_detailed(&line.text) {
                Ok(c) => {
                    for skipped in &c.skipped {
                        clean = false;
                        println!("{file}:{}: entry {} ({}) skipped: {:?}", line.number, skipped.index, skipped.preset, skipped.reason);
                    }
                }
                Err(e) => {
                    clean = false;
                    println!("{file}:{}:\n{:?}", line.number, miette::Report::new(e));
                }
            }
            continue;
        }

        match fbdraw::parse_detailed(&line.text, &format!("line-{}", line.number)) {
            Ok(parsed) => {
                for warning in &parsed.warnings {
                    clean = false;
                    report_warning(file, line.number, warning);
                }
                for issue in parsed.diagram.validate() {
                    clean = false;
                    println!("{file}:{}: {issue}", line.number);
                }
            }
            Err(e) => {
                clean = false;
                println!("{file}:{}:\n{:?}", line.number, miette::Report::new(e));
            }
        }
    }

    if clean {
        println!("{} notations ok", lines.len());
    }
    Ok(clean)
}

fn report_warning(file: &Utf8Path, number: usize, warning: &Warning) {
    println!("{file}:{number}: warning: {warning}");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
