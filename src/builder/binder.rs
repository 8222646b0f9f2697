use log::debug;
use regex::{Captures, Regex};

use super::CommandBuilder;
use crate::command::{Command, CommandKind, Parameter, ParameterDirection};
use crate::core::{DbError, ProviderType, Result};
use crate::metadata::{DataRequest, QueryParameter, QueryType};

lazy_static::lazy_static! {
    static ref POSITIONAL_TOKEN: Regex =
        Regex::new(r"\{(\d+)\}").expect("positional token pattern is valid");
}

impl CommandBuilder {
    /// Command for the request's free-form query text with its parameters bound
    pub fn build_text_command(&self, request: &mut DataRequest) -> Result<Command> {
        let kind = match request.query_type {
            QueryType::StoredProcedure => CommandKind::StoredProcedure,
            QueryType::Text | QueryType::TableDirect => CommandKind::Text,
        };
        let mut cmd = self.new_command(request, kind);

        self.bind_parameters(&mut cmd, request)?;
        cmd.text = request.query_text.clone().ok_or(DbError::MissingQueryText)?;

        debug!("text command: {} ({} parameters)", cmd.text, cmd.parameters.len());
        Ok(cmd)
    }

    /// Attach the request's ad-hoc parameters to a command
    ///
    /// Text containing `{n}` tokens is positional: each token is replaced by
    /// the anonymous placeholder and parameters are bound by value in list
    /// order. Otherwise parameters are bound by prefixed name; only output
    /// parameters carry type, size, scale and precision.
    pub fn bind_parameters(&self, cmd: &mut Command, request: &mut DataRequest) -> Result<()> {
        let positional = request.query_type == QueryType::Text
            && request
                .query_text
                .as_deref()
                .is_some_and(|text| POSITIONAL_TOKEN.is_match(text));

        if positional {
            if let Some(text) = request.query_text.as_deref() {
                let rewritten = self.replace_positional_tokens(text, request.parameters.len());
                request.query_text = Some(rewritten);
            }
            for param in &request.parameters {
                cmd.add_parameter(self.value_parameter(param));
            }
            return Ok(());
        }

        for param in &request.parameters {
            let mut p = self.value_parameter(param);

            match param.direction {
                ParameterDirection::InputOutput | ParameterDirection::ReturnValue => {
                    p.direction = param.direction;
                }
                ParameterDirection::Output => {
                    p.direction = ParameterDirection::Output;
                    if let Some(provider_type) = param.provider_type {
                        p.provider_type = provider_type;
                    }
                    p.size = param.size;
                    p.scale = param.scale;
                    p.precision = param.precision;
                }
                ParameterDirection::Input => {}
            }

            cmd.add_parameter(p);
        }

        Ok(())
    }

    /// Copy output values back onto the request parameters
    ///
    /// Returns the parameters that received values, or `None` when either
    /// the command or the request carried no parameters.
    pub fn gather_return_parameters(
        &self,
        cmd: &Command,
        request: &mut DataRequest,
    ) -> Result<Option<Vec<QueryParameter>>> {
        if cmd.parameters.is_empty() || request.parameters.is_empty() {
            return Ok(None);
        }

        let mut gathered = Vec::new();
        for param in &mut request.parameters {
            if !param.direction.returns_value() {
                continue;
            }
            let name = self.dialect.parameter(&param.name);
            let bound = cmd
                .parameter(&name)
                .ok_or(DbError::UnknownParameter(name))?;
            param.value = bound.value.clone();
            gathered.push(param.clone());
        }

        Ok(Some(gathered))
    }

    fn value_parameter(&self, param: &QueryParameter) -> Parameter {
        Parameter::new(
            self.dialect.parameter(&param.name),
            ProviderType::for_value(&param.value),
        )
        .with_value(param.value.clone())
    }

    fn replace_positional_tokens(&self, text: &str, count: usize) -> String {
        let placeholder = self.dialect.positional_placeholder.as_str();
        POSITIONAL_TOKEN
            .replace_all(text, |caps: &Captures| match caps[1].parse::<usize>() {
                Ok(index) if index < count => placeholder.to_string(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }
}
