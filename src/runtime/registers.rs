use crate::parser::{Operand, Register};

/// The 26 integer registers of a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterBank {
    cells: [i64; Register::COUNT],
}

impl RegisterBank {
    /// Creates a bank with every register at zero
    pub fn new() -> Self {
        RegisterBank {
            cells: [0; Register::COUNT],
        }
    }

    /// Current value of `reg`
    pub fn get(&self, reg: Register) -> i64 {
        self.cells[reg.index()]
    }

    /// Overwrites `reg`
    pub fn set(&mut self, reg: Register, value: i64) {
        self.cells[reg.index()] = value;
    }

    /// Applies `op` to `reg` in place
    pub fn update(&mut self, reg: Register, op: impl FnOnce(i64) -> i64) {
        let cell = &mut self.cells[reg.index()];
        *cell = op(*cell);
    }

    /// Value of an operand: the register's contents or the literal itself
    pub fn resolve(&self, operand: &Operand) -> i64 {
        match operand {
            Operand::Register(reg) => self.get(*reg),
            Operand::Immediate(value) => *value,
        }
    }

    /// Value of the register named by `letter`, if it is one
    pub fn get_letter(&self, letter: char) -> Option<i64> {
        Register::from_letter(letter).map(|reg| self.get(reg))
    }

    /// Copy of all 26 values, `a` first
    pub fn snapshot(&self) -> [i64; Register::COUNT] {
        self.cells
    }

    /// Zeroes every register
    pub fn reset(&mut self) {
        self.cells = [0; Register::COUNT];
    }
}

/// Operands of the last `cmp` and the outcome of the last jump test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompareState {
    /// Resolved left operand
    pub left: i64,
    /// Resolved right operand
    pub right: i64,
    /// Result of the most recent jump condition evaluated against this state
    pub outcome: bool,
    /// Register the left operand was read from, if any
    pub left_register: Option<Register>,
    /// Register the right operand was read from, if any
    pub right_register: Option<Register>,
}

impl CompareState {
    /// Records a comparison, reading registers from `bank`
    pub fn record(&mut self, bank: &RegisterBank, left: &Operand, right: &Operand) {
        *self = CompareState {
            left: bank.resolve(left),
            right: bank.resolve(right),
            outcome: self.outcome,
            left_register: left.register(),
            right_register: right.register(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(letter: char) -> Register {
        Register::from_letter(letter).unwrap()
    }

    #[test]
    fn test_zero_initialised() {
        let bank = RegisterBank::new();
        assert!(bank.snapshot().iter().all(|v| *v == 0));
    }

    #[test]
    fn test_set_update_reset() {
        let mut bank = RegisterBank::new();
        bank.set(reg('q'), 7);
        bank.update(reg('q'), |v| v * 3);
        assert_eq!(bank.get(reg('q')), 21);
        assert_eq!(bank.get_letter('q'), Some(21));
        assert_eq!(bank.get_letter('!'), None);
        bank.reset();
        assert_eq!(bank.get(reg('q')), 0);
    }

    #[test]
    fn test_compare_records_sources() {
        let mut bank = RegisterBank::new();
        bank.set(reg('a'), 4);
        let mut state = CompareState::default();
        state.record(&bank, &Operand::Register(reg('a')), &Operand::Immediate(9));
        assert_eq!((state.left, state.right), (4, 9));
        assert_eq!(state.left_register, Some(reg('a')));
        assert_eq!(state.right_register, None);
    }
}
