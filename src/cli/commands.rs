use colored::Colorize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{PadError, PadResult};
use crate::session::Session;
use crate::types::Table;

/// Parse one `COLUMN=VALUE` field assignment from the command line.
fn parse_field(arg: &str) -> PadResult<(String, String)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(PadError::Format(format!(
            "invalid field '{}': expected COLUMN=VALUE",
            arg
        ))),
    }
}

fn print_sheet_overview(session: &Session) {
    for name in session.sheet_names() {
        // Sheets listed here always exist; table() cannot fail for them.
        if let Ok(table) = session.table(name) {
            println!(
                "   📊 {}: {} columns, {} rows",
                name.bright_blue().bold(),
                table.columns.len(),
                table.row_count()
            );
        }
    }
}

fn print_table(table: &Table) {
    println!("   {}", table.columns.join(" | ").cyan().bold());
    if table.is_empty() {
        println!("   {}", "(no rows yet)".dimmed());
        return;
    }
    for row in &table.rows {
        println!("   {}", row.join(" | "));
    }
}

/// Execute the sheets command - list a workbook's sheets
pub fn sheets(file: PathBuf, reversed: bool) -> PadResult<()> {
    println!("{}", "📂 Sheetpad - Workbook overview".bold().green());
    println!("   File: {}\n", file.display());

    let session = Session::from_path(&file, reversed)?;
    println!(
        "{}",
        format!("✅ Loaded {} sheet(s)", session.sheet_names().len())
            .bold()
            .green()
    );
    print_sheet_overview(&session);
    Ok(())
}

/// Execute the show command - display one sheet's rows in logical order
pub fn show(file: PathBuf, sheet: String, reversed: bool) -> PadResult<()> {
    println!("{}", "📂 Sheetpad - Sheet view".bold().green());
    println!("   File: {}", file.display());
    println!("   Sheet: {}\n", sheet.bright_blue().bold());

    let session = Session::from_path(&file, reversed)?;
    print_table(session.table(&sheet)?);
    Ok(())
}

/// Execute the fields command - print the generated entry form for a sheet
pub fn fields(file: PathBuf, sheet: String, reversed: bool) -> PadResult<()> {
    println!("{}", "📝 Sheetpad - Entry form".bold().green());
    println!("   File: {}", file.display());
    println!("   Sheet: {}\n", sheet.bright_blue().bold());

    let session = Session::from_path(&file, reversed)?;
    for field in session.form(&sheet)? {
        println!("   {} = {}", field.name.cyan(), "_".dimmed());
    }
    Ok(())
}

/// Execute the add command - insert one row and export the whole workbook
pub fn add(
    file: PathBuf,
    sheet: String,
    set: Vec<String>,
    output: PathBuf,
    reversed: bool,
) -> PadResult<()> {
    println!("{}", "📝 Sheetpad - Add row".bold().green());
    println!("   File: {}", file.display());
    println!("   Sheet: {}\n", sheet.bright_blue().bold());

    let mut values: HashMap<String, String> = HashMap::new();
    for arg in &set {
        let (name, value) = parse_field(arg)?;
        values.insert(name, value);
    }

    let mut session = Session::from_path(&file, reversed)?;

    // Unset columns get the empty string, like untouched form inputs.
    for field in session.form(&sheet)? {
        values.entry(field.name).or_default();
    }

    let row_count = session.insert_row(&sheet, &values)?;
    println!(
        "{}",
        format!("✅ Row added to '{}' ({} rows now)", sheet, row_count)
            .bold()
            .green()
    );

    session.export_to_path(&output)?;
    println!("   Saved: {}", output.display());
    Ok(())
}

/// Execute the template command - check the bundled template workbook
pub fn template(path: PathBuf) -> PadResult<()> {
    println!("{}", "📦 Sheetpad - Template".bold().green());
    println!("   Path: {}\n", path.display());

    if !path.exists() {
        println!(
            "{}",
            "⚠️  Template not available - template-based entry is disabled".yellow()
        );
        println!("   Place a workbook at the path above, or pass --template-path");
        return Ok(());
    }

    let session = Session::from_template(&path)?;
    println!("{}", "✅ Template ready".bold().green());
    print_sheet_overview(&session);

    // Show the entry form of the first sheet as a preview.
    if let Some(first) = session.sheet_names().first().map(|s| s.to_string()) {
        println!("\n   Form for '{}':", first.bright_blue());
        for field in session.form(&first)? {
            println!("   {} = {}", field.name.cyan(), "_".dimmed());
        }
    }
    Ok(())
}
