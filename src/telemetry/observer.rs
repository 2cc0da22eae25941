use parking_lot::Mutex;

use crate::ledger::{Decimal, ErrorKind};

/// The operation a span describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanName {
    InitializeAccount,
    Deposit,
    Withdraw,
    DisplayBalance,
}

impl SpanName {
    pub fn as_str(self) -> &'static str {
        match self {
            SpanName::InitializeAccount => "initialize_account",
            SpanName::Deposit => "deposit",
            SpanName::Withdraw => "withdraw",
            SpanName::DisplayBalance => "display_balance",
        }
    }
}

impl std::fmt::Display for SpanName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal conditions attached to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    NegativeInitialBalance,
    LowBalance,
}

impl Warning {
    pub fn as_str(self) -> &'static str {
        match self {
            Warning::NegativeInitialBalance => "negative_initial_balance",
            Warning::LowBalance => "low_balance",
        }
    }
}

/// Plain-data record of one account operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    pub name: SpanName,
    pub owner: String,
    /// Requested amount, or the requested opening balance for `initialize_account`
    pub amount: Option<Decimal>,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    pub success: bool,
    pub error: Option<ErrorKind>,
    pub warning: Option<Warning>,
}

impl std::fmt::Display for SpanRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] owner={}", self.name, self.owner)?;
        if let Some(amount) = self.amount {
            write!(f, " amount={amount}")?;
        }
        write!(
            f,
            " balance_before={} balance_after={} success={}",
            self.balance_before, self.balance_after, self.success
        )?;
        if let Some(error) = self.error {
            write!(f, " error={error}")?;
        }
        if let Some(warning) = self.warning {
            write!(f, " warning={}", warning.as_str())?;
        }
        Ok(())
    }
}

/// Receives span records from instrumented accounts.
pub trait Observer {
    fn record(&self, span: SpanRecord);

    /// Export anything buffered so far.
    fn flush(&self) {}

    /// Flush and release the observer. Called once, when the process is done with it.
    fn shutdown(&self) {
        self.flush();
    }
}

impl<O: Observer + ?Sized> Observer for &O {
    fn record(&self, span: SpanRecord) {
        (**self).record(span);
    }

    fn flush(&self) {
        (**self).flush();
    }

    fn shutdown(&self) {
        (**self).shutdown();
    }
}

/// Batches spans and exports them through the `log` facade.
#[derive(Debug)]
pub struct LogObserver {
    service: String,
    batch_size: usize,
    pending: Mutex<Vec<SpanRecord>>,
}

impl LogObserver {
    pub const DEFAULT_BATCH_SIZE: usize = 32;

    pub fn new(service: impl Into<String>) -> Self {
        Self::with_batch_size(service, Self::DEFAULT_BATCH_SIZE)
    }

    pub fn with_batch_size(service: impl Into<String>, batch_size: usize) -> Self {
        Self {
            service: service.into(),
            batch_size: batch_size.max(1),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Number of spans waiting for the next flush
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    fn export(&self, spans: Vec<SpanRecord>) {
        for span in spans {
            log::info!("[{}] {span}", self.service);
        }
    }
}

impl Observer for LogObserver {
    fn record(&self, span: SpanRecord) {
        let batch = {
            let mut pending = self.pending.lock();
            pending.push(span);
            if pending.len() < self.batch_size {
                return;
            }
            std::mem::take(&mut *pending)
        };
        self.export(batch);
    }

    fn flush(&self) {
        let batch = std::mem::take(&mut *self.pending.lock());
        self.export(batch);
    }

    fn shutdown(&self) {
        self.flush();
        log::debug!("[{}] Span exporter shut down", self.service);
    }
}

/// Keeps every span in memory.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    spans: Mutex<Vec<SpanRecord>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans.lock().clone()
    }
}

impl Observer for CollectingObserver {
    fn record(&self, span: SpanRecord) {
        self.spans.lock().push(span);
    }
}
