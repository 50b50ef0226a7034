pub fn sanitize_name(name: &str) -> String {
    name.replace([' ', '-', '.'], "_")
}

pub fn sanitize_type(type_name: &str) -> String {
    let base = type_name.rsplit('.').next().unwrap_or(type_name);
    base.replace("[]", "Array_")
        .replace('*', "")
        .replace(' ', "_")
}

// Backslashes go first so the escapes inserted afterwards stay intact.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Quoted Mermaid comment text; also escapes tab and carriage return.
pub fn escape_comment(s: &str) -> String {
    escape(s).replace('\r', "\\r").replace('\t', "\\t")
}
