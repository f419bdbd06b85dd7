use clap::{Parser, Subcommand};
use sheetpad::cli;
use sheetpad::error::PadResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetpad")]
#[command(about = "Form-driven Excel data entry: view sheets, append rows, re-export.")]
#[command(long_about = "Sheetpad - form-driven Excel data entry

Loads a multi-sheet .xlsx workbook, shows its sheets, appends rows through a
generated per-column form, and writes the updated workbook back out.

COMMANDS:
  sheets    - List a workbook's sheets with row/column counts
  show      - Display one sheet's rows in entry order
  fields    - Print the generated entry form for a sheet
  add       - Append one row to a sheet and export the workbook
  template  - Check the bundled template workbook

EXAMPLES:
  sheetpad sheets packing.xlsx
  sheetpad show packing.xlsx --sheet Outbound
  sheetpad add packing.xlsx --sheet Outbound --set Item=Crate --set Qty=12 -o updated.xlsx
  sheetpad template --template-path data/template.xlsx

New rows always become the first visible row of their sheet. Empty sheets are
skipped on export; sheet order is preserved.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a workbook's sheets with row/column counts
    Sheets {
        /// Path to the .xlsx workbook
        file: PathBuf,

        /// Treat each sheet's rows as stored in reverse order
        #[arg(long)]
        reversed: bool,
    },

    #[command(long_about = "Display one sheet's rows in entry order.

Entry order is what the form shows and edits: the most recently added row
first. With --reversed, the file's physical row order is flipped on load,
so the last row of the file is shown first.")]
    /// Display one sheet's rows in entry order
    Show {
        /// Path to the .xlsx workbook
        file: PathBuf,

        /// Sheet to display
        #[arg(short, long)]
        sheet: String,

        /// Treat each sheet's rows as stored in reverse order
        #[arg(long)]
        reversed: bool,
    },

    /// Print the generated entry form for a sheet
    Fields {
        /// Path to the .xlsx workbook
        file: PathBuf,

        /// Sheet whose form to generate
        #[arg(short, long)]
        sheet: String,

        /// Treat each sheet's rows as stored in reverse order
        #[arg(long)]
        reversed: bool,
    },

    #[command(long_about = "Append one row to a sheet and export the workbook.

Field values are given as repeated --set COLUMN=VALUE arguments. Every
column of the sheet gets a value: columns not named default to the empty
string, and names outside the sheet's column set are rejected. The new row
becomes the first visible row.

The exported file contains every non-empty sheet of the workbook, in the
original sheet order, not just the edited one.

EXAMPLE:
  sheetpad add packing.xlsx --sheet Outbound --set Item=Crate --set Qty=12 -o updated.xlsx")]
    /// Append one row to a sheet and export the workbook
    Add {
        /// Path to the .xlsx workbook
        file: PathBuf,

        /// Sheet to append to
        #[arg(short, long)]
        sheet: String,

        /// Field assignment COLUMN=VALUE (repeatable)
        #[arg(long = "set", value_name = "COLUMN=VALUE")]
        set: Vec<String>,

        /// Output workbook path (.xlsx)
        #[arg(short, long)]
        output: PathBuf,

        /// Treat each sheet's rows as stored in reverse order
        #[arg(long)]
        reversed: bool,
    },

    #[command(long_about = "Check the bundled template workbook.

The template is the schema source for entry without an uploaded file. A
missing template disables template-based entry; this command reports that
instead of failing.")]
    /// Check the bundled template workbook
    Template {
        /// Path to the template workbook
        #[arg(long, default_value = "template.xlsx", env = "SHEETPAD_TEMPLATE")]
        template_path: PathBuf,
    },
}

fn main() -> PadResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sheets { file, reversed } => cli::sheets(file, reversed),

        Commands::Show {
            file,
            sheet,
            reversed,
        } => cli::show(file, sheet, reversed),

        Commands::Fields {
            file,
            sheet,
            reversed,
        } => cli::fields(file, sheet, reversed),

        Commands::Add {
            file,
            sheet,
            set,
            output,
            reversed,
        } => cli::add(file, sheet, set, output, reversed),

        Commands::Template { template_path } => cli::template(template_path),
    }
}
