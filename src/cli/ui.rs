use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Error => style(text).red().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Formats a fatal error for the terminal.
pub fn error_line(message: &str) -> String {
    format!("{} {}", style_text("Error:", StyleType::Error), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_line_contains_message() {
        let line = console::strip_ansi_codes(&error_line("Currency XYZ not found")).to_string();
        assert_eq!(line, "Error: Currency XYZ not found");
    }
}
