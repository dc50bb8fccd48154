use super::HookConfig;

/// Render the pre-commit script for `config`.
///
/// The venv check is emitted as a runtime `[ -d ]` test so a venv deleted
/// after installation does not break the hook.
pub(super) fn render(config: &HookConfig) -> String {
    let root = escape_double_quoted(&config.project_root.to_string_lossy());
    let activation = config
        .venv_dir_name
        .as_deref()
        .map(venv_activation)
        .unwrap_or_default();
    let command = &config.test_command;

    format!(
        r##"#!/bin/bash

# Pre-commit hook para rodar testes automaticamente antes do commit

echo "Rodando testes antes do commit..."

# Muda para o diretório do projeto
cd "{root}"

{activation}
# Roda os testes
{command}

# Verifica o código de saída dos testes
if [ $? -ne 0 ]; then
    echo ""
    echo "Testes falharam! Commit cancelado."
    echo "Corrija os testes antes de fazer commit."
    exit 1
fi

echo ""
echo "Todos os testes passaram!"
exit 0
"##
    )
}

fn venv_activation(name: &str) -> String {
    let name = escape_double_quoted(name);
    format!(
        r##"# Ativa a venv se existir
if [ -d "{name}" ]; then
    source "{name}/bin/activate"
fi
"##
    )
}

/// Escape the characters bash still interprets inside double quotes.
fn escape_double_quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
