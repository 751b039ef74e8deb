use quoter_syntax::literal::LINE_SEPARATOR;
use quoter_syntax::{ParamDescriptor, ParamType, SyntaxType, Value};

use super::Arg;
use crate::error::Result;
use crate::expr::Literal;

pub(crate) fn literal_value(literal: &Literal) -> Result<Value> {
    let value = match literal {
        Literal::Str(text) => Value::Str(text.clone()),
        Literal::LineSeparator => Value::Str(LINE_SEPARATOR.to_string()),
        Literal::Number(text) => match (text.parse::<i64>(), text.parse::<f64>()) {
            (Ok(value), _) => Value::Int(value),
            (_, Ok(value)) => Value::Double(value),
            _ => crate::bail!("{text} is not a number"),
        },
        Literal::Char(value) => Value::Char(*value),
        Literal::Bool(value) => Value::Bool(*value),
        Literal::Null | Literal::Default(_) => Value::Null,
    };
    Ok(value)
}

pub(crate) fn literal_type_name(literal: &Literal) -> String {
    match literal {
        Literal::Str(_) | Literal::LineSeparator => "string".to_string(),
        Literal::Number(_) => "number".to_string(),
        Literal::Char(_) => "char".to_string(),
        Literal::Bool(_) => "bool".to_string(),
        Literal::Null => "null".to_string(),
        Literal::Default(ty) => format!("default({ty})"),
    }
}

/// Converts an argument to a parameter type, or `None` when it does not fit.
pub(crate) fn coerce(ty: &ParamType, arg: &Arg<'_>, type_argument: Option<SyntaxType>) -> Option<Value> {
    let literal = match arg {
        Arg::Value(value) => return ty.coerce(value, type_argument),
        Arg::Literal(literal) => literal,
    };
    match (ty, literal) {
        (ParamType::String, Literal::Str(text)) => Some(Value::Str(text.clone())),
        (ParamType::String, Literal::LineSeparator) => Some(Value::Str(LINE_SEPARATOR.to_string())),
        (ParamType::Int, Literal::Number(text)) => text.parse().ok().map(Value::Int),
        (ParamType::Double, Literal::Number(text)) => text.parse().ok().map(Value::Double),
        (ParamType::Char, Literal::Char(value)) => Some(Value::Char(*value)),
        (ParamType::Bool, Literal::Bool(value)) => Some(Value::Bool(*value)),
        (ty, Literal::Null) => ty.is_nullable().then_some(Value::Null),
        (ty, Literal::Default(name)) => (ty.type_name() == *name).then(|| ty.default_value()),
        _ => None,
    }
}

/// Matches arguments to parameters: positionally first, then with trailing
/// arguments packed into a variadic last parameter.
pub(crate) fn bind(
    params: &[ParamDescriptor],
    args: &[Arg<'_>],
    type_argument: Option<SyntaxType>,
) -> Option<Vec<Value>> {
    direct(params, args, type_argument).or_else(|| packed(params, args, type_argument))
}

fn direct(params: &[ParamDescriptor], args: &[Arg<'_>], type_argument: Option<SyntaxType>) -> Option<Vec<Value>> {
    if args.len() > params.len() {
        return None;
    }
    params
        .iter()
        .enumerate()
        .map(|(index, param)| match args.get(index) {
            Some(arg) => coerce(&param.ty, arg, type_argument),
            None if param.variadic => Some(Value::Array(Vec::new())),
            None if param.optional => Some(omitted(param)),
            None => None,
        })
        .collect()
}

fn packed(params: &[ParamDescriptor], args: &[Arg<'_>], type_argument: Option<SyntaxType>) -> Option<Vec<Value>> {
    let (last, fixed) = params.split_last()?;
    let ParamType::Array(element) = last.ty else {
        return None;
    };
    if !last.variadic || args.len() < fixed.len() {
        return None;
    }
    let (leading, rest) = args.split_at(fixed.len());
    let mut values = fixed
        .iter()
        .zip(leading)
        .map(|(param, arg)| coerce(&param.ty, arg, type_argument))
        .collect::<Option<Vec<_>>>()?;
    let rest = rest
        .iter()
        .map(|arg| coerce(element, arg, type_argument))
        .collect::<Option<Vec<_>>>()?;
    values.push(Value::Array(rest));
    Some(values)
}

fn omitted(param: &ParamDescriptor) -> Value {
    if param.ty.is_nullable() {
        Value::Null
    } else {
        param.ty.default_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_literals() -> Result<()> {
        assert_eq!(literal_value(&Literal::Number("42".into()))?, Value::Int(42));
        assert_eq!(literal_value(&Literal::Number("0.5".into()))?, Value::Double(0.5));
        assert!(literal_value(&Literal::Number("x".into())).is_err());
        Ok(())
    }

    #[test]
    fn test_default_literal_matches_type_name() {
        let default = Literal::Default("SyntaxToken".into());
        let arg = Arg::Literal(&default);
        assert!(coerce(&ParamType::Token, &arg, None).is_some());
        assert_eq!(coerce(&ParamType::TokenList, &arg, None), None);
    }

    #[test]
    fn test_null_only_fits_nullable() {
        let null = Literal::Null;
        let arg = Arg::Literal(&null);
        assert_eq!(coerce(&ParamType::String, &arg, None), Some(Value::Null));
        assert_eq!(coerce(&ParamType::Token, &arg, None), None);
    }
}
