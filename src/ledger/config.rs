use super::Decimal;

/// How invalid deposits and withdrawals are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Rejections are reported in the `OperationReport` and leave state unchanged.
    /// Only negative amounts are invalid.
    #[default]
    Lenient,
    /// Rejections are returned as `LedgerError`. Zero and negative amounts are invalid.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    #[default]
    Disabled,
    Enabled,
}

/// What callers get back when they read the transaction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encapsulation {
    /// A borrowed view of the internal log
    #[default]
    Public,
    /// An owned copy, detached from the account
    CopyOnRead,
}

/// What happens to a negative opening balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialBalancePolicy {
    #[default]
    AcceptAsIs,
    ClampToZero,
}

/// Behaviour switches for an `Account`.
///
/// The two presets reproduce the account before and after the validation fixes:
/// [`LedgerConfig::original`] and [`LedgerConfig::patched`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub validation: ValidationPolicy,
    pub history: HistoryMode,
    pub encapsulation: Encapsulation,
    pub initial_balance: InitialBalancePolicy,
    /// Withdrawals leaving the balance below this amount raise a low balance warning
    pub low_balance_threshold: Option<Decimal>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::original()
    }
}

impl LedgerConfig {
    /// Lenient validation, no history, negative opening balances accepted.
    pub fn original() -> Self {
        Self {
            validation: ValidationPolicy::Lenient,
            history: HistoryMode::Disabled,
            encapsulation: Encapsulation::Public,
            initial_balance: InitialBalancePolicy::AcceptAsIs,
            low_balance_threshold: None,
        }
    }

    /// Strict validation, copy-on-read history, clamped opening balance
    /// and a low balance warning under 100.
    pub fn patched() -> Self {
        Self {
            validation: ValidationPolicy::Strict,
            history: HistoryMode::Enabled,
            encapsulation: Encapsulation::CopyOnRead,
            initial_balance: InitialBalancePolicy::ClampToZero,
            low_balance_threshold: Some(Decimal::ONE_HUNDRED),
        }
    }

    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    pub fn with_encapsulation(mut self, encapsulation: Encapsulation) -> Self {
        self.encapsulation = encapsulation;
        self
    }

    pub fn with_initial_balance(mut self, initial_balance: InitialBalancePolicy) -> Self {
        self.initial_balance = initial_balance;
        self
    }

    pub fn with_low_balance_threshold(mut self, threshold: Option<Decimal>) -> Self {
        self.low_balance_threshold = threshold;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.validation == ValidationPolicy::Strict
    }
}
