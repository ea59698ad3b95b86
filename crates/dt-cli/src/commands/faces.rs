use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(die: &str) -> Result<(), String> {
    let kind = super::lookup_die(die)?;
    let spec = kind.spec();

    println!(
        "  {} {}",
        spec.label.bold(),
        format!("({} faces)", spec.sides).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Face", "X", "Y", "Z"]);
    for face in spec.faces {
        let o = face.orientation;
        table.add_row(vec![
            kind.format_value(face.value),
            format!("{:.3}", o.x),
            format!("{:.3}", o.y),
            format!("{:.3}", o.z),
        ]);
    }
    println!("{table}");

    Ok(())
}
