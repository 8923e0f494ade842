use crate::path::parser::PathCommand;

/// Format commands back into path data, e.g. `"M 10 20 L 30 40 Z"`.
///
/// Re-parsing the output yields the same command list.
pub fn print_path(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for (i, cmd) in commands.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(cmd.kind);
        for &arg in &cmd.args {
            out.push(' ');
            out.push_str(&format_float(arg));
        }
    }
    out
}

/// Shortest decimal form of `value`: whole numbers print without a fraction and trailing
/// zeros are dropped. Negative zero prints as `0`.
pub fn format_float(value: f32) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f32 {
        return (value as i64).to_string();
    }
    let s = value.to_string();
    if s.contains('.') && !s.contains(['e', 'E']) {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/printer.rs"]
mod tests;
