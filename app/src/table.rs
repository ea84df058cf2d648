use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::models::Empresa;

/// Estrutura tabular intermediária usada na exportação.
///
/// Linhas são os registros, na ordem em que foram consultados; colunas são a
/// união dos campos observados, na ordem em que aparecem pela primeira vez.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Empresa>,
}

impl Table {
    pub fn from_records(records: Vec<Empresa>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        Self { columns, rows: records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Empresa> {
        self.rows.iter()
    }

    /// Valor de uma célula; `None` se a linha não existe ou o registro não tem a coluna.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Grava como CSV: cabeçalho com as colunas e uma linha por registro, sem coluna de índice.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|col| render_cell(row.get(col)))
                .collect();
            wtr.write_record(&cells)?;
        }

        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Grava como JSON: um array com um objeto por registro. Colunas ausentes
    /// em um registro saem como `null`.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let records: Vec<Map<String, Value>> = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| (col.clone(), row.get(col).cloned().unwrap_or(Value::Null)))
                    .collect()
            })
            .collect();

        serde_json::to_writer(writer, &records)?;
        Ok(())
    }

    pub fn to_csv(&self, path: &Path) -> Result<()> {
        let mut writer = create_file(path)?;
        self.write_csv(&mut writer)?;
        flush(writer, path)
    }

    pub fn to_json(&self, path: &Path) -> Result<()> {
        let mut writer = create_file(path)?;
        self.write_json(&mut writer)?;
        flush(writer, path)
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| ClientError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

fn flush(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|e| ClientError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        // números, arrays e objetos em JSON compacto
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empresa(value: Value) -> Empresa {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Table {
        Table::from_records(vec![
            empresa(json!({ "taxIdNumber": "11111111000191", "officialName": "ACME LTDA", "meiOptant": false })),
            empresa(json!({ "taxIdNumber": "22222222000191", "tradeName": "Padaria", "size": 2 })),
        ])
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let table = sample();
        assert_eq!(
            table.columns(),
            ["taxIdNumber", "officialName", "meiOptant", "tradeName", "size"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "size"), Some(&json!(2)));
        assert_eq!(table.get(1, "officialName"), None);
        assert_eq!(table.get(5, "taxIdNumber"), None);

        let ids: Vec<&str> = table.rows().filter_map(Empresa::tax_id).collect();
        assert_eq!(ids, ["11111111000191", "22222222000191"]);
    }

    #[test]
    fn empty_table_has_no_columns() {
        let table = Table::from_records(Vec::new());
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn csv_has_header_and_rows_without_index() {
        let mut out = Vec::new();
        sample().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "taxIdNumber,officialName,meiOptant,tradeName,size");
        assert_eq!(lines[1], "11111111000191,ACME LTDA,False,,");
        assert_eq!(lines[2], "22222222000191,,,Padaria,2");
    }

    #[test]
    fn csv_renders_nested_values_as_json() {
        let table = Table::from_records(vec![empresa(json!({
            "economicActivities": [{ "code": "6201-5/01", "isMain": true }]
        }))]);
        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let record = rdr.records().next().unwrap().unwrap();
        let parsed: Value = serde_json::from_str(&record[0]).unwrap();
        assert_eq!(parsed, json!([{ "code": "6201-5/01", "isMain": true }]));
    }

    #[test]
    fn json_fills_missing_columns_with_null() {
        let mut out = Vec::new();
        sample().write_json(&mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(
            parsed,
            json!([
                { "taxIdNumber": "11111111000191", "officialName": "ACME LTDA", "meiOptant": false, "tradeName": null, "size": null },
                { "taxIdNumber": "22222222000191", "officialName": null, "meiOptant": null, "tradeName": "Padaria", "size": 2 }
            ])
        );
    }
}
