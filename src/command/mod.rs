use brush_parser::ast;

/// Error returned when a command string cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// Parse a shell command string and return the programs it runs.
///
/// Uses brush-parser to build a shell AST, then walks it collecting the name
/// of every simple command, including those nested in subshells, groups,
/// loops and conditionals. Function bodies are skipped since a definition
/// alone runs nothing. Assignments (`A=1 pytest`) are not programs.
///
/// Returns `Err` on syntax errors such as unbalanced quotes or a trailing `&&`.
pub(crate) fn programs(command: &str) -> Result<Vec<String>, ParseError> {
    if command.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = brush_parser::Parser::builder()
        .reader(std::io::Cursor::new(command.to_string()))
        .build();

    let program = parser
        .parse_program()
        .map_err(|e| ParseError(e.to_string()))?;

    let mut pending: Vec<&ast::AndOrList> = program
        .complete_commands
        .iter()
        .flat_map(|complete_command| complete_command.0.iter().map(|item| &item.0))
        .collect();
    pending.reverse();

    let mut names = Vec::new();
    while let Some(list) = pending.pop() {
        let mut nested = Vec::new();
        for pipeline in pipelines(list) {
            for command in &pipeline.seq {
                match command {
                    ast::Command::Simple(simple) => {
                        let name = simple
                            .word_or_name
                            .as_ref()
                            .map(|word| word.flatten())
                            .unwrap_or_default();
                        if !name.is_empty() {
                            names.push(name);
                        }
                    }
                    ast::Command::Compound(compound, _) => {
                        nested.extend(bodies(compound).into_iter().flat_map(|body| &body.0));
                    }
                    // Defining a function runs nothing.
                    ast::Command::Function(_) | ast::Command::ExtendedTest(_) => {}
                }
            }
        }
        pending.extend(nested.into_iter().rev().map(|item| &item.0));
    }
    Ok(names)
}

fn pipelines(list: &ast::AndOrList) -> impl Iterator<Item = &ast::Pipeline> {
    std::iter::once(&list.first).chain(list.additional.iter().map(|and_or| match and_or {
        ast::AndOr::And(pipeline) | ast::AndOr::Or(pipeline) => pipeline,
    }))
}

/// The command lists a compound command may execute.
fn bodies(command: &ast::CompoundCommand) -> Vec<&ast::CompoundList> {
    match command {
        ast::CompoundCommand::BraceGroup(group) => vec![&group.list],
        ast::CompoundCommand::Subshell(subshell) => vec![&subshell.list],
        ast::CompoundCommand::ForClause(clause) => vec![&clause.body.list],
        ast::CompoundCommand::ArithmeticForClause(clause) => vec![&clause.body.list],
        ast::CompoundCommand::WhileClause(clause) | ast::CompoundCommand::UntilClause(clause) => {
            vec![&clause.0, &clause.1.list]
        }
        ast::CompoundCommand::IfClause(clause) => {
            let mut lists = vec![&clause.condition, &clause.then];
            for branch in clause.elses.iter().flatten() {
                lists.extend(branch.condition.as_ref());
                lists.push(&branch.body);
            }
            lists
        }
        ast::CompoundCommand::CaseClause(clause) => {
            clause.cases.iter().filter_map(|case| case.cmd.as_ref()).collect()
        }
        ast::CompoundCommand::Arithmetic(_) => vec![],
    }
}
