//! Duke Grid CLI - formula evaluation and CSV clean-up tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use duke_grid::prelude::*;
use duke_grid::{evaluate_display, suggestions, CsvReadOptions, CsvWriteOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "duke-grid")]
#[command(
    author,
    version,
    about = "Evaluate grid formulas and apply bulk transforms to CSV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula against the cells of a CSV file
    Eval {
        /// Input CSV file
        input: PathBuf,

        /// Formula, e.g. "=SUM(A1:A10)"
        formula: String,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Compute every formula cell of a CSV file and output the values
    Calc {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Apply a transform to a range of a CSV file
    Transform {
        /// Input CSV file
        input: PathBuf,

        /// Transform to apply
        #[arg(value_enum)]
        op: OpArg,

        /// Range to transform, e.g. "A2:C100" (default: whole file)
        #[arg(short, long)]
        range: Option<String>,

        /// Text to find (replace only)
        #[arg(long)]
        find: Option<String>,

        /// Replacement text (replace only)
        #[arg(long, default_value = "")]
        replace: String,

        /// Match find text regardless of case
        #[arg(short, long)]
        ignore_case: bool,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// List formula functions, optionally those starting with a prefix
    Functions {
        /// Name prefix, e.g. "AV"
        prefix: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OpArg {
    Trim,
    Upper,
    Lower,
    Dedupe,
    Replace,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            input,
            formula,
            delimiter,
        } => eval(&input, &formula, delimiter),
        Commands::Calc {
            input,
            output,
            delimiter,
        } => calc(&input, output.as_deref(), delimiter),
        Commands::Transform {
            input,
            op,
            range,
            find,
            replace,
            ignore_case,
            output,
            delimiter,
        } => {
            let op = match op {
                OpArg::Trim => TransformOp::Trim,
                OpArg::Upper => TransformOp::Upper,
                OpArg::Lower => TransformOp::Lower,
                OpArg::Dedupe => TransformOp::RemoveDuplicates,
                OpArg::Replace => {
                    let find = find.context("--find is required for replace")?;
                    TransformOp::find_replace(find, replace, !ignore_case)
                }
            };
            transform(
                &input,
                &op,
                range.as_deref(),
                output.as_deref(),
                delimiter,
            )
        }
        Commands::Functions { prefix } => list_functions(prefix.as_deref()),
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter must be a single ASCII character, got '{}'", delimiter))
}

fn read_options(delimiter: char) -> Result<CsvReadOptions> {
    Ok(CsvReadOptions {
        delimiter: delimiter_byte(delimiter)?,
        ..Default::default()
    })
}

fn write_options(delimiter: char) -> Result<CsvWriteOptions> {
    Ok(CsvWriteOptions {
        delimiter: delimiter_byte(delimiter)?,
        ..Default::default()
    })
}

fn eval(input: &Path, formula: &str, delimiter: char) -> Result<()> {
    let store = CsvReader::read_store_file(input, &read_options(delimiter)?)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("{}", evaluate_display(formula, &store));
    Ok(())
}

fn calc(input: &Path, output: Option<&Path>, delimiter: char) -> Result<()> {
    let store = CsvReader::read_store_file(input, &read_options(delimiter)?)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    // Fields are read as literal text; commit them so formulas are recognised
    let mut session = Session::new(GridSettings::default());
    for (pos, data) in store.iter() {
        session.commit_edit(pos, &data.value);
    }
    let stats = session.recalculate();
    eprintln!(
        "Calculated {} formulas ({} errors)",
        stats.formula_count, stats.errors
    );

    let mut buf = Vec::new();
    CsvWriter::write_store(session.store(), &mut buf, &write_options(delimiter)?)
        .context("Failed to format CSV")?;
    emit(&buf, output)
}

fn transform(
    input: &Path,
    op: &TransformOp,
    range: Option<&str>,
    output: Option<&Path>,
    delimiter: char,
) -> Result<()> {
    let grid = CsvReader::read_file(input, &read_options(delimiter)?)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    if grid.is_empty() {
        bail!("'{}' has no rows", input.display());
    }

    let rect = match range {
        Some(range) => {
            let range: CellRange = range
                .parse()
                .with_context(|| format!("Invalid range '{}'", range))?;
            GridRect::from(range)
        }
        None => GridRect::full(grid.len(), grid[0].len()),
    };

    let out = op
        .apply(&grid, rect)
        .with_context(|| format!("Failed to apply {}", op))?;
    let changed = grid
        .iter()
        .flatten()
        .zip(out.iter().flatten())
        .filter(|(a, b)| a != b)
        .count();
    eprintln!("{}: {} cells changed", op, changed);

    let mut buf = Vec::new();
    CsvWriter::write(&out, &mut buf, &write_options(delimiter)?).context("Failed to format CSV")?;
    emit(&buf, output)
}

fn emit(bytes: &[u8], output: Option<&Path>) -> Result<()> {
    if let Some(output_path) = output {
        std::fs::write(output_path, bytes)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote '{}'", output_path.display());
    } else {
        io::stdout()
            .write_all(bytes)
            .context("Failed to write to stdout")?;
    }
    Ok(())
}

fn list_functions(prefix: Option<&str>) -> Result<()> {
    let input = format!("={}", prefix.unwrap_or_default());
    let matches = suggestions(&input);
    if matches.is_empty() {
        bail!("No functions match '{}'", prefix.unwrap_or_default());
    }
    for def in matches {
        println!("{:<8} {:<18} {}", def.name, def.example, def.description);
    }
    Ok(())
}
