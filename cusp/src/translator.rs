//! Lowering from symbols to machine operations.

use cvm::alu::wrap_word;
use cvm::constants::{INPUT_ADDRESS, OUTPUT_ADDRESS};
use cvm::operations::{
    BinaryCode, JumpCode, MemoryCode, Operand, Operation, Registry, RegistryCode, StackCode,
};
use cvm::Word;

use crate::comparators;
use crate::error::TranslationError;
use crate::parser::Symbol;
use crate::reader::Reader;
use crate::variables::{VarDef, VariableIndex};

/// ASCII code of `'0'`, the base of the decimal output template.
const DIGIT_BASE: Word = 48;

/// One parsed argument position.
enum Argument {
    /// The next symbol opens a nested expression; nothing was consumed.
    Expression,
    Integer(Word),
    Variable(VarDef),
    /// The characters between the quotes of a string symbol.
    Text(String),
}

/// Walks the reader and grows a flat operation list.
///
/// The `translate_*` methods are mutually recursive and all share the reader
/// cursor, the result vector and the variable index. The accumulator is the
/// default result register; the other register serves as the scratch side of
/// every binary operation.
pub struct Translator {
    pub(crate) reader: Reader,
    pub(crate) result: Vec<Operation>,
    pub(crate) variables: VariableIndex,
}

fn operator_code(symbol: &str) -> Option<BinaryCode> {
    match symbol {
        "+" => Some(BinaryCode::Add),
        "-" => Some(BinaryCode::Sub),
        "*" => Some(BinaryCode::Mul),
        "/" => Some(BinaryCode::Div),
        "%" => Some(BinaryCode::Mod),
        _ => None,
    }
}

fn mov(registry: RegistryCode, value: Word) -> Operation {
    Operation::binary(BinaryCode::Mov, Registry::from(registry), value)
}

impl Translator {
    pub fn new(reader: Reader) -> Translator {
        Translator {
            reader,
            result: Vec::new(),
            variables: VariableIndex::new(),
        }
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.result
    }

    /// Steps the reader back one symbol and returns the one it lands on: the
    /// closest description of where translation failed.
    pub fn offending_symbol(&mut self) -> Option<Symbol> {
        self.reader.back();
        self.reader.current_or_none()
    }

    fn check_closed_bracket(&mut self) -> Result<(), TranslationError> {
        self.reader.next_closing()
    }

    fn extend_result(&mut self, operations: &[Operation]) {
        self.result.extend_from_slice(operations);
    }

    fn buffer_of(registry: RegistryCode) -> RegistryCode {
        match registry {
            RegistryCode::A => RegistryCode::B,
            RegistryCode::B => RegistryCode::A,
        }
    }

    fn parse_argument(&mut self, allow_strings: bool) -> Result<Argument, TranslationError> {
        if self.reader.current()?.is_expression() {
            return Ok(Argument::Expression);
        }

        let symbol = self.reader.next()?;
        if symbol.is_quoted() {
            if allow_strings {
                let text = &symbol.text;
                return Ok(Argument::Text(text[1..text.len() - 1].to_string()));
            }
            return Err(TranslationError::StringArgument);
        }

        if !symbol.text.is_empty() && symbol.text.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(value) = symbol.text.parse::<i64>() {
                return Ok(Argument::Integer(wrap_word(value)));
            }
        }

        Ok(Argument::Variable(self.variables.read(&symbol.text)?))
    }

    /// Lowers one argument into `result_registry`. When `operation` is given
    /// it is appended after the argument; a string argument repeats it after
    /// every character.
    pub(crate) fn translate_argument(
        &mut self,
        operation: Option<Operation>,
        result_registry: RegistryCode,
        allow_strings: bool,
        stack: bool,
    ) -> Result<(), TranslationError> {
        match self.parse_argument(allow_strings)? {
            Argument::Text(text) => {
                for character in text.chars() {
                    self.result.push(mov(result_registry, character as Word));
                    if let Some(operation) = operation {
                        self.result.push(operation);
                    }
                }
                return Ok(());
            }
            Argument::Expression => self.translate_valuable(result_registry, stack)?,
            Argument::Integer(value) => self.result.push(mov(result_registry, value)),
            Argument::Variable(variable) => self.result.push(Operation::memory(
                MemoryCode::Load,
                Registry::from(result_registry),
                variable.location,
            )),
        }

        if let Some(operation) = operation {
            self.result.push(operation);
        }
        Ok(())
    }

    /// Lowers `(op a b ...)`: the first argument lands in `result_registry`
    /// and every further one in the buffer register, with the binary
    /// operation issued after each. When the operation is itself nested
    /// (`stack`), the caller's scratch register is preserved around the
    /// argument loop.
    fn translate_operation(
        &mut self,
        code: BinaryCode,
        result_registry: RegistryCode,
        stack: bool,
    ) -> Result<(), TranslationError> {
        self.translate_argument(None, result_registry, false, true)?;
        let buffer_registry = Self::buffer_of(result_registry);

        if stack {
            self.result
                .push(Operation::stack(StackCode::Push, Registry::from(buffer_registry)));
        }
        while !self.reader.current_or_closing()?.is_closing() {
            self.translate_argument(None, buffer_registry, false, true)?;
            self.result.push(Operation::binary(
                code,
                Registry::from(result_registry),
                Operand::from(buffer_registry),
            ));
        }
        if stack {
            self.result
                .push(Operation::stack(StackCode::Grab, Registry::from(buffer_registry)));
        }
        Ok(())
    }

    /// Emits the fixed decimal-printing template.
    ///
    /// Digits are produced least-significant first with `%10` / `/10` and
    /// pushed onto the stack under a NUL sentinel, then popped back out in
    /// print order. Negatives print a leading `-`, zero prints as a bare
    /// `'0'`, and the number ends with a newline. The value itself survives
    /// in `registry` around the whole template.
    fn translate_output(&mut self, registry: RegistryCode) {
        let target = Registry::from(registry);
        let scratch = Registry::from(Self::buffer_of(registry));

        self.extend_result(&[
            Operation::stack(StackCode::Push, target),
            // Register-to-register move, only there to set the flags.
            Operation::binary(BinaryCode::Mov, target, target),
        ]);
        self.extend_result(&[
            // Zero short-circuits to a single '0'.
            Operation::jump(JumpCode::Jz, 1),
            Operation::jump(JumpCode::Jb, 3),
            Operation::binary(BinaryCode::Add, target, DIGIT_BASE),
            Operation::memory(MemoryCode::Save, target, OUTPUT_ADDRESS),
            Operation::jump(JumpCode::Jb, 18),
        ]);
        self.extend_result(&[
            // Negatives print '-' and continue with the magnitude.
            Operation::jump(JumpCode::Jn, 1),
            Operation::jump(JumpCode::Jb, 3),
            Operation::binary(BinaryCode::Mov, scratch, 45),
            Operation::memory(MemoryCode::Save, scratch, OUTPUT_ADDRESS),
            Operation::binary(BinaryCode::Mul, target, -1),
        ]);
        self.extend_result(&[
            // NUL sentinel under the digits.
            Operation::binary(BinaryCode::Mov, scratch, 0),
            Operation::stack(StackCode::Push, scratch),
        ]);
        self.extend_result(&[
            // Digit loop.
            Operation::binary(BinaryCode::Mov, scratch, target),
            Operation::jump(JumpCode::Jz, 5),
            Operation::binary(BinaryCode::Mod, scratch, 10),
            Operation::binary(BinaryCode::Add, scratch, DIGIT_BASE),
            Operation::stack(StackCode::Push, scratch),
            Operation::binary(BinaryCode::Div, target, 10),
            Operation::jump(JumpCode::Jb, -7),
        ]);
        self.extend_result(&[
            // Pop and print until the sentinel comes back up.
            Operation::stack(StackCode::Grab, target),
            Operation::jump(JumpCode::Jz, 2),
            Operation::memory(MemoryCode::Save, target, OUTPUT_ADDRESS),
            Operation::jump(JumpCode::Jb, -4),
        ]);
        self.extend_result(&[
            Operation::binary(BinaryCode::Mov, target, 10),
            Operation::memory(MemoryCode::Save, target, OUTPUT_ADDRESS),
            Operation::stack(StackCode::Grab, target),
        ]);
    }

    /// Lowers the condition of an `if`/`loop` and the body blocks, leaving
    /// the skip jump at its placeholder offset. Returns the index of the jump
    /// to patch once the end of the construct is known.
    fn translate_construct(&mut self) -> Result<usize, TranslationError> {
        let header = self.reader.next()?;

        if header.is_expression() {
            let comparator = &header.text[1..];
            let template = comparators::comparator(comparator)
                .ok_or_else(|| TranslationError::UnknownComparator(comparator.to_string()))?;
            let data = template.data();

            self.translate_operation(data.command, RegistryCode::A, false)?;
            self.result.push(Operation::jump(data.jump, 1));
            if data.negated {
                self.result.push(Operation::jump(JumpCode::Jb, 1));
            }
            self.check_closed_bracket()?;
        } else {
            let variable = self.variables.read(&header.text)?;
            self.result
                .push(Operation::memory(MemoryCode::Load, Registry::A, variable.location));
            self.result.push(Operation::jump(JumpCode::Jz, 1));
        }

        let skip_jump = self.result.len() - 1;
        self.translate_blocks(true)?;
        Ok(skip_jump)
    }

    /// Points the jump at `index` just past the current end of the result.
    fn patch_jump(&mut self, index: usize) {
        let offset = (self.result.len() - index - 1) as Word;
        if let Some(Operation::Jump(jump)) = self.result.get_mut(index) {
            jump.offset = offset;
        }
    }

    /// Lowers one parenthesized form into `result_registry`.
    pub(crate) fn translate_valuable(
        &mut self,
        result_registry: RegistryCode,
        stack: bool,
    ) -> Result<(), TranslationError> {
        let header = self.reader.next_expression()?;
        let head = &header.text[1..];

        match head {
            "input" => {
                self.result.push(Operation::memory(
                    MemoryCode::Load,
                    Registry::from(result_registry),
                    INPUT_ADDRESS,
                ));
            }
            "print" => {
                let save = Operation::memory(
                    MemoryCode::Save,
                    Registry::from(result_registry),
                    OUTPUT_ADDRESS,
                );
                self.translate_argument(Some(save), result_registry, true, stack)?;
            }
            "output" => {
                self.translate_argument(None, result_registry, false, stack)?;
                self.translate_output(result_registry);
            }
            "assign" => {
                let name = self.reader.next()?.text;
                let location = self.variables.register(&name)?;
                let save = Operation::memory(
                    MemoryCode::Save,
                    Registry::from(result_registry),
                    location,
                );
                self.translate_argument(Some(save), result_registry, false, stack)?;
            }
            "if" => {
                let skip_jump = self.translate_construct()?;
                self.patch_jump(skip_jump);
            }
            "loop" => {
                let condition_start = self.result.len();
                let skip_jump = self.translate_construct()?;
                let back_offset = condition_start as i64 - self.result.len() as i64 - 1;
                self.result
                    .push(Operation::jump(JumpCode::Jb, back_offset as Word));
                self.patch_jump(skip_jump);
            }
            _ => {
                let code = operator_code(head)
                    .ok_or_else(|| TranslationError::UnknownOperation(head.to_string()))?;
                self.translate_operation(code, result_registry, stack)?;
            }
        }

        self.check_closed_bracket()
    }

    /// Walks top-level forms until the symbols run out, or, inside a
    /// construct body (`allow_quit`), until a closing symbol is reached.
    pub fn translate_blocks(&mut self, allow_quit: bool) -> Result<(), TranslationError> {
        while self.reader.has_next() {
            if allow_quit && self.reader.current_or_closing()?.is_closing() {
                return Ok(());
            }
            self.translate_valuable(RegistryCode::A, false)?;
        }
        Ok(())
    }
}
