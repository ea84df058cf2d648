use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registro cadastral de uma empresa, como devolvido pela API.
///
/// O formato pertence à API externa, então o registro é mantido como um
/// objeto JSON sem esquema fixo (a ordem dos campos é preservada).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Empresa(Map<String, Value>);

#[derive(Debug, Clone, PartialEq)]
pub struct AtividadeEconomica {
    pub code: String,
    pub description: String,
    pub is_main: bool,
}

impl Empresa {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn tax_id(&self) -> Option<&str> {
        self.str_field("taxIdNumber")
    }

    pub fn official_name(&self) -> Option<&str> {
        self.str_field("officialName")
    }

    pub fn trade_name(&self) -> Option<&str> {
        self.str_field("tradeName")
    }

    /// Atividades econômicas (CNAEs) do registro. Entradas que não são
    /// objetos são ignoradas.
    pub fn atividades_economicas(&self) -> Vec<AtividadeEconomica> {
        let Some(Value::Array(items)) = self.0.get("economicActivities") else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(Value::as_object)
            .map(|item| AtividadeEconomica {
                code: scalar_to_string(item.get("code")),
                description: scalar_to_string(item.get("description")),
                is_main: item.get("isMain").map(is_truthy).unwrap_or(false),
            })
            .collect()
    }

    pub fn atividade_principal(&self) -> Option<AtividadeEconomica> {
        self.atividades_economicas().into_iter().find(|a| a.is_main)
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }
}

fn scalar_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// A API usa tanto booleanos quanto strings ("true", "S", "Sim") nos indicadores
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "s" | "sim" | "y" | "yes"
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empresa(value: Value) -> Empresa {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accessors_read_known_fields() {
        let e = empresa(json!({
            "taxIdNumber": "11111111000191",
            "officialName": "ACME LTDA",
            "tradeName": "ACME",
            "size": 3
        }));
        assert_eq!(e.tax_id(), Some("11111111000191"));
        assert_eq!(e.official_name(), Some("ACME LTDA"));
        assert_eq!(e.trade_name(), Some("ACME"));
        assert_eq!(e.keys().collect::<Vec<_>>(), ["taxIdNumber", "officialName", "tradeName", "size"]);
    }

    #[test]
    fn missing_or_mistyped_fields_are_none() {
        let e = empresa(json!({ "officialName": 42 }));
        assert_eq!(e.tax_id(), None);
        assert_eq!(e.official_name(), None);
        assert!(e.atividades_economicas().is_empty());
    }

    #[test]
    fn economic_activities_accept_boolean_like_flags() {
        let e = empresa(json!({
            "economicActivities": [
                { "code": "6201-5/01", "description": "Desenvolvimento de software", "isMain": "true" },
                { "code": "6202-3/00", "description": "Consultoria", "isMain": false },
                "lixo",
                { "code": 7020400, "description": null, "isMain": "N" }
            ]
        }));

        let atividades = e.atividades_economicas();
        assert_eq!(atividades.len(), 3);
        assert!(atividades[0].is_main);
        assert!(!atividades[1].is_main);
        assert_eq!(atividades[2].code, "7020400");
        assert_eq!(atividades[2].description, "");
        assert!(!atividades[2].is_main);

        let principal = e.atividade_principal().unwrap();
        assert_eq!(principal.code, "6201-5/01");
    }
}
