//! The conversion driver: routes tokens into the context tree, finalizes
//! each record as its object closes, spills accepted records to the
//! scratch buffer and runs gene consolidation once the stream ends.

use std::io::Read;

use serde_json::Value;

use crate::consolidate::consolidate_by_gene;
use crate::context::{Context, Group};
use crate::errors::ConvertError;
use crate::router::{PathRouter, Routed};
use crate::scratch::ScratchBuffer;
use crate::stream::{TokenSink, stream_tokens};
use crate::token::{JsonPath, Scalar, Token};

/// Structural hooks a flavor can register on start/end-of-group events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// A record's object closed: finalize it.
    PositionDone,
    /// A new variant object opened under the current record.
    VariantStart,
    /// A new sample object opened under the current record.
    SampleStart,
    /// A new transcript object opened under the current variant.
    TranscriptStart,
    /// The current transcript object closed.
    TranscriptDone,
    /// One consequence term of the current transcript.
    ConsequenceTerm,
}

/// One record flavor: its path registrations plus the massaging that turns
/// an assembled record into an output value, or rejects it.
pub trait Adapter {
    /// Name of this flavor's array in the report wrapper.
    const SECTION: &'static str;

    /// Populate the field and handler registries.
    fn register(router: &mut PathRouter<Hook>);

    /// A consequence term arrived for the transcript under assembly.
    fn consequence(&mut self, _term: &Scalar) {}

    /// The transcript under assembly closed.
    fn transcript_done(&mut self, _ctx: &mut Context) {}

    /// Massage the finished record into its output form; `None` discards
    /// it silently.
    fn finalize(&mut self, record: Group) -> Result<Option<Value>, ConvertError>;
}

/// Streaming state for one conversion run of one flavor.
pub struct Converter<A: Adapter> {
    router: PathRouter<Hook>,
    ctx: Context,
    adapter: A,
    scratch: ScratchBuffer,
}

impl<A: Adapter> Converter<A> {
    pub fn new(adapter: A) -> Result<Self, ConvertError> {
        let mut router = PathRouter::new();
        A::register(&mut router);
        Ok(Converter {
            router,
            ctx: Context::new(),
            adapter,
            scratch: ScratchBuffer::create()?,
        })
    }

    /// Drain the scratch buffer: every record accepted during streaming,
    /// in emission order.
    pub fn finish(self) -> Result<Vec<Value>, ConvertError> {
        self.scratch.into_records()
    }

    fn finalize_record(&mut self) -> Result<(), ConvertError> {
        let record = self.ctx.take_record();
        if let Some(massaged) = self.adapter.finalize(record)? {
            self.scratch.push(&massaged)?;
        }
        Ok(())
    }
}

impl<A: Adapter> TokenSink for Converter<A> {
    fn on_token(&mut self, path: &JsonPath, token: Token) -> Result<(), ConvertError> {
        let hook = match self.router.route(path, token.kind) {
            Routed::Field(output) => {
                if let Some(value) = token.value {
                    let keys: Vec<&str> = path.keys().collect();
                    if let Some((_, parent)) = keys.split_last() {
                        self.ctx.set_field(parent, output, value);
                    }
                }
                return Ok(());
            }
            Routed::Handler(hook) => hook,
            Routed::None => return Ok(()),
        };

        match hook {
            Hook::VariantStart => self.ctx.enter_group(&["positions", "variants"]),
            Hook::SampleStart => self.ctx.enter_group(&["positions", "samples"]),
            Hook::TranscriptStart => {
                self.ctx.enter_group(&["positions", "variants", "transcripts"])
            }
            Hook::TranscriptDone => self.adapter.transcript_done(&mut self.ctx),
            Hook::ConsequenceTerm => {
                if let Some(term) = &token.value {
                    self.adapter.consequence(term);
                }
            }
            Hook::PositionDone => self.finalize_record()?,
        }
        Ok(())
    }
}

/// Run one full conversion: stream the document in `reader` through the
/// flavor's registrations, then consolidate the accepted records by gene.
pub fn convert<R: Read, A: Adapter>(reader: R, adapter: A) -> Result<Vec<Value>, ConvertError> {
    let mut converter = Converter::new(adapter)?;
    stream_tokens(reader, &mut converter)?;
    let records = converter.finish()?;
    Ok(consolidate_by_gene(records))
}

/// The first sample of a record; warns on the error stream when more than
/// one is present, since later samples are not processed.
pub(crate) fn first_sample(record: &Group) -> Option<&Group> {
    let samples = record.groups("samples");
    if samples.len() > 1 {
        eprintln!("More than one sample found, only processing the first one.");
    }
    samples.first()
}
