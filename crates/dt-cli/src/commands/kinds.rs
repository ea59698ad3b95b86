use comfy_table::{ContentArrangement, Table};
use dt_core::catalog;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Label", "Sides", "Faces"]);

    for spec in catalog::entries() {
        table.add_row(vec![
            spec.id.to_string(),
            spec.label.to_string(),
            spec.sides.to_string(),
            super::face_labels(spec.kind).join(" "),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} die kinds", catalog::entries().len());

    Ok(())
}
