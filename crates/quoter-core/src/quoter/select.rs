use quoter_syntax::{FactoryDescriptor, ParamType, SyntaxKind, SyntaxNode, SyntaxType};

use super::Quoted;

/// Picks the one overload a node is quoted with. Ties resolve to the
/// earliest registered overload, so output is reproducible.
pub(super) fn choose(
    candidates: &[&'static FactoryDescriptor],
    node: &SyntaxNode,
    pool: &[Quoted],
) -> Option<&'static FactoryDescriptor> {
    if candidates.len() <= 1 {
        return candidates.first().copied();
    }
    let ty = node.syntax_type();
    let mut remaining = candidates.to_vec();

    if prefers_string(ty) {
        narrow(&mut remaining, |descriptor| {
            descriptor
                .params
                .first()
                .map_or(false, |param| param.ty == ParamType::String)
        });
    }
    if ty == SyntaxType::LiteralExpression && !is_keyword_literal(node.kind()) {
        narrow(&mut remaining, |descriptor| descriptor.params.len() == 2);
    }
    narrow(&mut remaining, |descriptor| {
        descriptor.required_params().all(|param| {
            pool.iter()
                .any(|quoted| quoted.property.eq_ignore_ascii_case(param.property()))
        })
    });

    let fewest = remaining.iter().map(|descriptor| descriptor.params.len()).min()?;
    remaining.retain(|descriptor| descriptor.params.len() == fewest);
    remaining
        .iter()
        .find(|descriptor| descriptor.params.last().map_or(false, |param| param.variadic))
        .or_else(|| {
            remaining
                .iter()
                .find(|descriptor| matches!(descriptor.params, [param] if param.optional))
        })
        .or_else(|| remaining.first())
        .copied()
}

/// Keeps the candidates passing `keep`, unless none does.
fn narrow(remaining: &mut Vec<&'static FactoryDescriptor>, keep: impl Fn(&FactoryDescriptor) -> bool) {
    if remaining.iter().any(|descriptor| keep(*descriptor)) {
        remaining.retain(|descriptor| keep(*descriptor));
    }
}

/// Names and type declarations read best with their identifier as a string.
fn prefers_string(ty: SyntaxType) -> bool {
    ty == SyntaxType::IdentifierName || SyntaxType::BaseTypeDeclaration.is_assignable_from(ty)
}

fn is_keyword_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::TrueLiteralExpression
            | SyntaxKind::FalseLiteralExpression
            | SyntaxKind::NullLiteralExpression
    )
}
