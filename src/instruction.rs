use std::fmt;

/// A single item of a postfix instruction sequence.
///
/// The parser emits instructions in postfix order: every operation follows
/// all of its operands. The evaluator reads the sequence from its tail, so the
/// operand emitted last (nearest the tail) is the right-hand operand of the
/// source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// A literal value.
    Number(f64),
    /// A symbol resolved at evaluation time against the constants table and
    /// then the caller's variables.
    Identifier(String),
    /// A binary operation, one of `+ - * / ^`. Takes two operands.
    Operator(char),
    /// A call to a registered function. Unary functions take one operand;
    /// binary functions such as `max` take two.
    Function(String),
    /// Arithmetic negation of one operand.
    UnaryMinus,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "<number:{value}>"),
            Self::Identifier(name) => write!(f, "<ident:{name}>"),
            Self::Operator(symbol) => write!(f, "<operator:{symbol}>"),
            Self::Function(name) => write!(f, "<function:{name}>"),
            Self::UnaryMinus => f.write_str("<unary_minus>"),
        }
    }
}

/// An ordered postfix instruction sequence.
///
/// A `Program` is produced by a successful parse and is never modified by
/// evaluation, so the same program can be evaluated against any number of
/// variable tables. Programs can also be built by hand from a
/// `Vec<Instruction>`; the evaluator rejects malformed ones with an error.
///
/// # Example
/// ```
/// use lattice_expr::instruction::{Instruction, Program};
///
/// let program = lattice_expr::parse("-(a+1)").unwrap();
/// assert_eq!(program.instructions(),
///            &[Instruction::Identifier("a".to_string()),
///              Instruction::Number(1.0),
///              Instruction::Operator('+'),
///              Instruction::UnaryMinus]);
/// assert_eq!(program.to_string(),
///            "<ident:a> <number:1> <operator:+> <unary_minus>");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// The instructions in emission order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the sequence holds no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterates over the instructions in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Names of all identifiers the program refers to, first occurrence
    /// first, without duplicates.
    ///
    /// Lattice readers use this to find the attributes an expression depends
    /// on before evaluating it. Constants are included; the program does not
    /// know which names the registry defines.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for instruction in &self.instructions {
            if let Instruction::Identifier(name) = instruction
               && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }

    /// Consumes the program, returning the raw instruction vector.
    #[must_use]
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

impl<'a> IntoIterator for &'a Program {
    type IntoIter = std::slice::Iter<'a, Instruction>;
    type Item = &'a Instruction;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_deduplicated_in_order() {
        let program = Program::from(vec![Instruction::Identifier("b".to_string()),
                                         Instruction::Identifier("a".to_string()),
                                         Instruction::Operator('*'),
                                         Instruction::Identifier("b".to_string()),
                                         Instruction::Operator('+')]);
        assert_eq!(program.identifiers(), vec!["b", "a"]);
    }

    #[test]
    fn display_matches_stack_item_rendering() {
        assert_eq!(Instruction::Number(2.5).to_string(), "<number:2.5>");
        assert_eq!(Instruction::Function("sin".to_string()).to_string(), "<function:sin>");
        assert_eq!(Program::default().to_string(), "");
    }
}
