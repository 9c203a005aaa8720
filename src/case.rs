//! Identifier case conversion between DTO properties (camelCase) and columns (snake_case).

/// "grid_name" -> "gridName"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// "gridName" -> "grid_name"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_both_ways() {
        assert_eq!(to_snake_case("selectionShowCheckBoxesMode"), "selection_show_check_boxes_mode");
        assert_eq!(to_camel_case("on_click_action"), "onClickAction");
        assert_eq!(to_snake_case("id"), "id");
    }
}
