//! File names and x-axis labels for APA panels.
//!
//! Inputs follow `<stem>intra_<k>_apa.npy` for the intra-chromosomal distance
//! bins and `<stem>inter_apa.npy` for the inter-chromosomal aggregate. The stem
//! is concatenated verbatim, so it usually ends with a separator such as `_`
//! or `/`.

/// Label of the inter-chromosomal panel.
pub const INTER_LABEL: &str = "INTER";

pub fn intra_name(stem: &str, k: u32) -> String {
    format!("{stem}intra_{k}_apa.npy")
}

pub fn inter_name(stem: &str) -> String {
    format!("{stem}inter_apa.npy")
}

/// Distance-bin label of intra panel `p`: `2^(p-1)` MB to `2^p` MB.
///
/// Panel 0 starts at half a megabase and prints as `0.5MB-1MB`.
pub fn intra_label(p: u32) -> String {
    format!(
        "{}MB-{}MB",
        pow2_string(i64::from(p) - 1),
        pow2_string(i64::from(p))
    )
}

/// The x-axis label of a panel. `index` is ignored for inter panels.
pub fn panel_label(index: u32, is_intra: bool) -> String {
    if is_intra {
        intra_label(index)
    } else {
        INTER_LABEL.to_string()
    }
}

fn pow2_string(exp: i64) -> String {
    match u32::try_from(exp).ok().and_then(|e| 2u128.checked_pow(e)) {
        Some(v) => v.to_string(),
        // negative or beyond u128: shortest float form, e.g. 0.5
        None => format!("{}", 2f64.powi(exp.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intra_name_concatenates_stem_and_index() {
        assert_eq!(intra_name("run1_", 3), "run1_intra_3_apa.npy");
        assert_eq!(intra_name("", 0), "intra_0_apa.npy");
        assert_eq!(intra_name("out/sample.", 7), "out/sample.intra_7_apa.npy");
    }

    #[test]
    fn inter_name_concatenates_stem() {
        assert_eq!(inter_name("run1_"), "run1_inter_apa.npy");
        assert_eq!(inter_name(""), "inter_apa.npy");
    }

    #[test]
    fn intra_labels_double_per_panel() {
        assert_eq!(intra_label(0), "0.5MB-1MB");
        assert_eq!(intra_label(1), "1MB-2MB");
        assert_eq!(intra_label(3), "4MB-8MB");
        assert_eq!(intra_label(7), "64MB-128MB");
    }

    #[test]
    fn inter_label_ignores_index() {
        assert_eq!(panel_label(0, false), "INTER");
        assert_eq!(panel_label(5, false), "INTER");
        assert_eq!(panel_label(5, true), "16MB-32MB");
    }

    #[test]
    fn large_exponents_stay_exact() {
        assert_eq!(intra_label(64), "9223372036854775808MB-18446744073709551616MB");
    }
}
