use std::path::Path;

/// Remove CNPJs vazios mantendo a ordem original. Um CNPJ só com espaços
/// não é vazio: é consultado e falha na API.
pub fn non_empty_ids<S: AsRef<str>>(tax_ids: &[S]) -> Vec<&str> {
    tax_ids
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| !id.is_empty())
        .collect()
}

/// Junta a URL base e o CNPJ com exatamente uma barra entre eles.
pub fn join_url(base_url: &str, tax_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), tax_id.trim_start_matches('/'))
}

pub fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}

pub fn format_progress(current: usize, total: usize) -> String {
    if total == 0 {
        return "0.0% (0/0)".to_string();
    }
    let percent = (current as f64 / total as f64) * 100.0;
    format!("{:.1}% ({}/{})", percent, current, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_empty_ids_preserving_order() {
        let ids = vec!["", "111", "", "222", "333"];
        assert_eq!(non_empty_ids(&ids), ["111", "222", "333"]);

        let blank = vec!["  ", ""];
        assert_eq!(non_empty_ids(&blank), ["  "]);

        let owned: Vec<String> = vec!["".into(), "444".into()];
        assert_eq!(non_empty_ids(&owned), ["444"]);
    }

    #[test]
    fn join_url_uses_single_slash() {
        assert_eq!(join_url("https://empresas.p.rapidapi.com/", "111"), "https://empresas.p.rapidapi.com/111");
        assert_eq!(join_url("http://127.0.0.1:8080", "111"), "http://127.0.0.1:8080/111");
    }

    #[test]
    fn progress_format() {
        assert_eq!(format_progress(1, 4), "25.0% (1/4)");
        assert_eq!(format_progress(0, 0), "0.0% (0/0)");
    }
}
