use std::error::Error;
use std::fs;

use textcodecs::compression::huffman::{bit_string, build_tree, generate_codes};
use textcodecs::compression::{build_frequency_table, evaluate, EvaluatorConfig, Lz77Config};

const SAMPLE_TEXT: &str = "In the heart of the city, there was a mysterious bookstore. \
Every book contained a world, and every world had a secret. \
Among the dusty shelves, a young man named Arthur found an old, \
leather-bound volume titled 'The Key to Dreams'. \
As he opened it, he was transported into realms beyond imagination. \
Dragons soared, kingdoms rose and fell, stars sang ancient songs. \
Arthur's journey was not just a journey through stories, but through himself. \
He faced fears, discovered forgotten joys, and realized that every ending was a beginning. \
Each page turned was a step into the unknown, and each step taught him courage. \
When he finally closed the book, the city looked different. \
Or perhaps, he was the one who had changed.";

const USAGE: &str = "usage: codec_report [--window N] [--lookahead N] [FILE]";

struct Args {
    input: Option<String>,
    lz77: Lz77Config,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let defaults = Lz77Config::default();
    let mut window = defaults.window_size();
    let mut lookahead = defaults.lookahead_size();
    let mut input = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--window" | "--lookahead" => {
                let flag = &args[i];
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{flag} needs a value\n{USAGE}"))?
                    .parse::<usize>()
                    .map_err(|e| format!("{flag}: {e}"))?;
                if flag == "--window" {
                    window = value;
                } else {
                    lookahead = value;
                }
                i += 2;
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            path => {
                input = Some(path.to_string());
                i += 1;
            }
        }
    }

    let lz77 = Lz77Config::new(window, lookahead).map_err(|e| e.to_string())?;
    Ok(Args { input, lz77 })
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE_TEXT.to_string(),
    };
    let data = text.as_bytes();

    let evaluation = evaluate(data, &EvaluatorConfig::new(args.lz77))?;
    println!(
        "LZ77 window {}, lookahead {}",
        args.lz77.window_size(),
        args.lz77.lookahead_size()
    );
    print!("{evaluation}");
    if let Some(best) = evaluation.best() {
        println!("best: {}", best.codec);
    }

    if data.is_empty() {
        return Ok(());
    }
    let freq = build_frequency_table(data);
    let codes = generate_codes(&build_tree(&freq)?);
    println!();
    println!("Huffman codes (most frequent first):");
    for (symbol, code, count) in codes.by_frequency(&freq) {
        println!(
            "  {:?}: {} (frequency {})",
            char::from(symbol),
            bit_string(code),
            count
        );
    }
    if let Some(average) = codes.average_code_len(&freq) {
        println!("average code length: {average:.3} bits");
    }
    Ok(())
}
