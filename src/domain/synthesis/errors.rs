//! Synthesis Context - Errors

use thiserror::Error;

/// 单条校验错误，消息直接返回给客户端
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Parâmetros 'texto' e 'saida' são obrigatórios.")]
    MissingRequired,

    #[error("Voz inválida. Opções: {options}")]
    UnknownVoice { options: String },

    #[error("O 'texto' excede o limite de {limit} caracteres.")]
    TextTooLong { limit: usize },

    #[error("O parâmetro 'saida' não contém um nome de arquivo válido.")]
    InvalidOutputName,

    #[error("Formato inválido: '{0}'.")]
    InvalidFormat(String),
}

/// 累积的校验错误
///
/// 不变量: 非空
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub(super) Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_joined_with_space() {
        let errors = ValidationErrors(vec![
            ValidationError::MissingRequired,
            ValidationError::TextTooLong { limit: 10 },
        ]);

        assert_eq!(
            errors.to_string(),
            "Parâmetros 'texto' e 'saida' são obrigatórios. O 'texto' excede o limite de 10 caracteres."
        );
    }
}
