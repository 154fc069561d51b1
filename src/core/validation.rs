//! Input validation for new plant listings.
//!
//! Validation works on the raw JSON payload rather than a deserialized struct so
//! that missing or mistyped fields become field-level violations instead of a
//! deserialization failure. Every rule is evaluated; the caller receives either
//! the typed input or the full list of violations in field order.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single rule violation on one payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable description of the violation
    pub message: &'static str,
}

impl FieldError {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// A validated plant payload, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NovaPlanta {
    /// Name, never blank
    pub nome: String,
    /// Short tagline, never blank
    pub subtitulo: String,
    /// Comma-separated tags, never blank
    pub etiquetas: String,
    /// Price, strictly positive
    pub preco: f64,
    /// Whether the plant is on promotion
    pub esta_em_promocao: bool,
    /// Always `None` unless `esta_em_promocao` is set
    pub porcentagem_desconto: Option<f64>,
    /// Care and growth characteristics, never blank
    pub caracteristicas: String,
    /// Full description, never blank
    pub descricao: String,
    /// Image path or URL, never blank
    pub url_imagem: String,
    /// Referenced plant type; existence is checked by storage
    pub tipo_planta_id: i64,
}

/// Required text fields with their "missing" messages, in reporting order.
const TEXT_FIELDS: [(&str, &str); 6] = [
    ("nome", "Nome é obrigatório"),
    ("subtitulo", "Subtítulo é obrigatório"),
    ("etiquetas", "Etiquetas são obrigatórias"),
    ("caracteristicas", "Características são obrigatórias"),
    ("descricao", "Descrição é obrigatória"),
    ("url_imagem", "URL da imagem é obrigatória"),
];

/// Validates a plant creation payload.
///
/// A payload that is not a JSON object is treated as an object without fields.
///
/// # Errors
/// Returns every violated rule when the payload is invalid.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn validate_nova_planta(payload: &Value) -> Result<NovaPlanta, Vec<FieldError>> {
    let empty = Map::new();
    let fields = payload.as_object().unwrap_or(&empty);
    let mut errors = Vec::new();

    let [nome, subtitulo, etiquetas, caracteristicas, descricao, url_imagem] =
        TEXT_FIELDS.map(|(field, message)| required_text(fields, field, message, &mut errors));

    let preco = positive_number(
        fields,
        "preco",
        "Preço é obrigatório",
        "Preço deve ser positivo",
        &mut errors,
    );

    let tipo_planta_id = positive_number(
        fields,
        "tipo_planta_id",
        "Tipo de planta é obrigatório",
        "ID do tipo de planta deve ser positivo",
        &mut errors,
    )
    .and_then(|id| {
        if id.fract() == 0.0 && id < i64::MAX as f64 {
            Some(id as i64)
        } else {
            errors.push(FieldError::new(
                "tipo_planta_id",
                "ID do tipo de planta deve ser um número inteiro",
            ));
            None
        }
    });

    let esta_em_promocao = match fields.get("esta_em_promocao") {
        None | Some(Value::Null) => Some(false),
        Some(value) => {
            let flag = as_bool(value);
            if flag.is_none() {
                errors.push(FieldError::new(
                    "esta_em_promocao",
                    "Esta em promoção deve ser verdadeiro ou falso",
                ));
            }
            flag
        }
    };

    let porcentagem_desconto = if esta_em_promocao == Some(true) {
        discount_percentage(fields, &mut errors)
    } else {
        None
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    match (
        nome,
        subtitulo,
        etiquetas,
        caracteristicas,
        descricao,
        url_imagem,
        preco,
        tipo_planta_id,
        esta_em_promocao,
    ) {
        (
            Some(nome),
            Some(subtitulo),
            Some(etiquetas),
            Some(caracteristicas),
            Some(descricao),
            Some(url_imagem),
            Some(preco),
            Some(tipo_planta_id),
            Some(esta_em_promocao),
        ) => Ok(NovaPlanta {
            nome,
            subtitulo,
            etiquetas,
            preco,
            esta_em_promocao,
            porcentagem_desconto,
            caracteristicas,
            descricao,
            url_imagem,
            tipo_planta_id,
        }),
        // Every `None` above pushed an error, so this arm is never reached with an empty list.
        _ => Err(errors),
    }
}

fn required_text(
    fields: &Map<String, Value>,
    field: &'static str,
    message: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn positive_number(
    fields: &Map<String, Value>,
    field: &'static str,
    missing: &'static str,
    not_positive: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let value = match fields.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, missing));
            return None;
        }
        Some(value) => value,
    };

    match as_number(value) {
        Some(n) if n > 0.0 => Some(n),
        Some(_) => {
            errors.push(FieldError::new(field, not_positive));
            None
        }
        None => {
            errors.push(FieldError::new(field, "Deve ser um número"));
            None
        }
    }
}

fn discount_percentage(fields: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<f64> {
    const FIELD: &str = "porcentagem_desconto";

    let percentage = positive_number(
        fields,
        FIELD,
        "Porcentagem de desconto é obrigatória quando está em promoção",
        "Porcentagem de desconto deve ser positiva",
        errors,
    )?;

    if percentage > 100.0 {
        errors.push(FieldError::new(
            FIELD,
            "Porcentagem de desconto não pode ser maior que 100%",
        ));
        return None;
    }
    Some(percentage)
}

/// Numbers, or strings holding a number. Non-finite values are rejected.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "nome": "Cacto",
            "subtitulo": "x",
            "etiquetas": "t",
            "preco": 10.5,
            "caracteristicas": "c",
            "descricao": "d",
            "url_imagem": "/i.png",
            "tipo_planta_id": 4
        })
    }

    fn fields_of(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_payload_without_promotion() {
        let planta = validate_nova_planta(&valid_payload()).unwrap();

        assert_eq!(planta.nome, "Cacto");
        assert_eq!(planta.preco, 10.5);
        assert_eq!(planta.tipo_planta_id, 4);
        assert!(!planta.esta_em_promocao);
        assert_eq!(planta.porcentagem_desconto, None);
    }

    #[test]
    fn test_discount_is_dropped_when_not_in_promotion() {
        let mut payload = valid_payload();
        payload["esta_em_promocao"] = json!(false);
        payload["porcentagem_desconto"] = json!(250);

        let planta = validate_nova_planta(&payload).unwrap();
        assert_eq!(planta.porcentagem_desconto, None);
    }

    #[test]
    fn test_promotion_requires_discount_in_range() {
        for discount in [None, Some(json!(0)), Some(json!(-5)), Some(json!(100.5))] {
            let mut payload = valid_payload();
            payload["esta_em_promocao"] = json!(true);
            if let Some(discount) = discount {
                payload["porcentagem_desconto"] = discount;
            }

            let errors = validate_nova_planta(&payload).unwrap_err();
            assert_eq!(fields_of(&errors), vec!["porcentagem_desconto"]);
        }
    }

    #[test]
    fn test_promotion_with_valid_discount() {
        let mut payload = valid_payload();
        payload["esta_em_promocao"] = json!(true);
        payload["porcentagem_desconto"] = json!(100);

        let planta = validate_nova_planta(&payload).unwrap();
        assert!(planta.esta_em_promocao);
        assert_eq!(planta.porcentagem_desconto, Some(100.0));
    }

    #[test]
    fn test_empty_payload_reports_every_required_field() {
        let errors = validate_nova_planta(&json!({})).unwrap_err();

        assert_eq!(
            fields_of(&errors),
            vec![
                "nome",
                "subtitulo",
                "etiquetas",
                "caracteristicas",
                "descricao",
                "url_imagem",
                "preco",
                "tipo_planta_id",
            ]
        );
    }

    #[test]
    fn test_non_object_payload_does_not_panic() {
        for payload in [json!(null), json!([1, 2]), json!("planta"), json!(42)] {
            let errors = validate_nova_planta(&payload).unwrap_err();
            assert_eq!(errors.len(), 8);
        }
    }

    #[test]
    fn test_blank_and_mistyped_fields() {
        let mut payload = valid_payload();
        payload["nome"] = json!("   ");
        payload["descricao"] = json!(12);
        payload["preco"] = json!("abc");
        payload["tipo_planta_id"] = json!(-1);
        payload["esta_em_promocao"] = json!("talvez");

        let errors = validate_nova_planta(&payload).unwrap_err();
        assert_eq!(
            fields_of(&errors),
            vec![
                "nome",
                "descricao",
                "preco",
                "tipo_planta_id",
                "esta_em_promocao"
            ]
        );
    }

    #[test]
    fn test_numeric_strings_and_boolean_strings_are_accepted() {
        let mut payload = valid_payload();
        payload["preco"] = json!("19.90");
        payload["tipo_planta_id"] = json!("2");
        payload["esta_em_promocao"] = json!("true");
        payload["porcentagem_desconto"] = json!("20");

        let planta = validate_nova_planta(&payload).unwrap();
        assert_eq!(planta.preco, 19.9);
        assert_eq!(planta.tipo_planta_id, 2);
        assert_eq!(planta.porcentagem_desconto, Some(20.0));
    }

    #[test]
    fn test_type_id_beyond_i64_range_is_rejected() {
        let mut payload = valid_payload();
        payload["tipo_planta_id"] = json!(9_223_372_036_854_775_808.0_f64);

        let errors = validate_nova_planta(&payload).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["tipo_planta_id"]);
    }

    #[test]
    fn test_fractional_type_id_is_rejected() {
        let mut payload = valid_payload();
        payload["tipo_planta_id"] = json!(1.5);

        let errors = validate_nova_planta(&payload).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(
                "tipo_planta_id",
                "ID do tipo de planta deve ser um número inteiro"
            )]
        );
    }
}
