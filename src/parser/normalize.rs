/// Romanian diacritics, both cedilla and comma-below forms, mapped to ASCII.
/// Applied before the generic transliteration pass so these letters never
/// depend on its tables.
const DIACRITICS_RULES: &[(&[char], char)] = &[
    (&['ș', 'ş'], 's'),
    (&['Ș', 'Ş'], 'S'),
    (&['ț', 'ţ'], 't'),
    (&['Ț', 'Ţ'], 'T'),
    (&['ă', 'â'], 'a'),
    (&['Ă', 'Â'], 'A'),
    (&['î'], 'i'),
    (&['Î'], 'I'),
];

/// Replace all diacritics in `text` with their plain counterparts, then fold
/// whatever non-ASCII is left to its closest ASCII form.
pub fn strip_diacritics(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let mut result = text.to_string();
    for (variants, replacement) in DIACRITICS_RULES {
        if result.contains(*variants) {
            result = result.replace(*variants, &replacement.to_string());
        }
    }

    if result.is_ascii() {
        result
    } else {
        deunicode::deunicode(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passthrough() {
        let text = "Proiect de ordin privind aprobarea normelor (2020) - 10 zile!";
        assert_eq!(strip_diacritics(text), text);
    }

    #[test]
    fn romanian_both_forms() {
        assert_eq!(strip_diacritics("hotărâre"), "hotarare");
        assert_eq!(strip_diacritics("ordonanța de urgență"), "ordonanta de urgenta");
        assert_eq!(strip_diacritics("ordonanţa"), "ordonanta");
        assert_eq!(strip_diacritics("Sănătății"), "Sanatatii");
        assert_eq!(strip_diacritics("ȘTIRI ŞI ȚARA ŢARA"), "STIRI SI TARA TARA");
        assert_eq!(strip_diacritics("Înfiinţare"), "Infiintare");
    }

    #[test]
    fn fallback_transliteration() {
        assert_eq!(strip_diacritics("café"), "cafe");
        assert!(strip_diacritics("Müller – „citat”").is_ascii());
    }

    #[test]
    fn idempotent() {
        for text in ["hotărâre de guvern", "Müller „x”", "", "plain", "ÎŞȚĂâ"] {
            let once = strip_diacritics(text);
            assert_eq!(strip_diacritics(&once), once);
        }
    }
}
