pub mod faces;
pub mod kinds;
pub mod roll;

use dt_core::{DieKind, catalog};

/// Face values of `kind` as printed on the die, in face order.
fn face_labels(kind: DieKind) -> Vec<String> {
    kind.spec()
        .values()
        .map(|v| kind.format_value(v))
        .collect()
}

/// Look up a die id given on the command line.
fn lookup_die(id: &str) -> Result<DieKind, String> {
    catalog::lookup(id)
        .map(|spec| spec.kind)
        .map_err(|e| e.to_string())
}
