use std::time::Duration;
use uuid::Uuid;

use crate::caption::CaptionRecord;
use crate::errors::CaptionError;
use crate::log;
use crate::prompt;
use crate::provider::DynProvider;
use crate::session::Session;

/// Notified whenever the busy flag flips.
pub trait BusyIndicator: Send + Sync {
    fn busy_changed(&self, busy: bool);
}

pub struct Dispatcher {
    provider: DynProvider,
    reveal_delay: Duration,
    debug: bool,
    indicator: Option<Box<dyn BusyIndicator>>,
}

impl Dispatcher {
    pub fn new(provider: DynProvider, reveal_delay: Duration, debug: bool) -> Self {
        Self { provider, reveal_delay, debug, indicator: None }
    }

    pub fn with_indicator(mut self, indicator: Box<dyn BusyIndicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Runs one dispatch against the session's current form.
    ///
    /// Validation failures return before the busy flag is touched. The busy
    /// flag stays set for as long as the provider call is pending; nothing
    /// here stops a caller from starting another dispatch meanwhile.
    pub async fn dispatch<'s>(&self, session: &'s mut Session) -> Result<&'s CaptionRecord, CaptionError> {
        let fields = session.form.validate()?;
        let id = Uuid::new_v4();
        let prompt = prompt::caption_prompt(&fields);
        if self.debug {
            log::print_dispatch_debug(id, self.provider.name(), &prompt);
        }

        self.set_busy(session, true);
        let outcome = self.provider.generate(&prompt, self.debug).await;

        match outcome {
            Ok(text) => {
                if !self.reveal_delay.is_zero() {
                    tokio::time::sleep(self.reveal_delay).await;
                }
                let record = CaptionRecord::new(id, fields.platform, fields.style, fields.topic, text);
                if self.debug {
                    log::print_record_debug(&record);
                }
                self.set_busy(session, false);
                Ok(session.push(record))
            }
            Err(e) => {
                if self.debug {
                    log::print_failure_debug(id, &e);
                }
                self.set_busy(session, false);
                Err(CaptionError::Generation(e))
            }
        }
    }

    fn set_busy(&self, session: &mut Session, busy: bool) {
        session.form.set_busy(busy);
        if let Some(ind) = &self.indicator {
            ind.busy_changed(busy);
        }
    }
}
