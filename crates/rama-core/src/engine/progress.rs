#[derive(Debug, Clone)]
pub enum Progress {
    LadderStart { temperatures: usize },
    LadderFinish,

    ReplicaStart {
        temperature: f64,
        replica_index: usize,
        samples: u64,
    },
    SampleDrawn,
    ReplicaFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional host callback. Hosts wanting
/// cancellation or progress display hook in here; `SampleDrawn` fires once
/// per full conformer, which is the intended cooperative check granularity.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
