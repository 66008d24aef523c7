/// `part / total` as a whole percentage, rounded half away from zero
pub fn percentage(part: u32, total: usize) -> u32 {
    match total {
        positive if positive > 0 => ((part as f64 / positive as f64) * 100.0).round() as u32,
        _ => 0,
    }
}

/// Characters that fit in `width` columns, with an ellipsis when cut
pub fn fit_width(text: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        let candidate = format!("{out}{c}…");
        if candidate.width() > width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(10, 10), 100);
    }

    #[test]
    fn test_percentage_empty_total() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_fit_width_short_text() {
        assert_eq!(fit_width("cat", 10), "cat");
    }

    #[test]
    fn test_fit_width_truncates() {
        assert_eq!(fit_width("elephant", 5), "elep…");
    }
}
