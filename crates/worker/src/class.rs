/// Execution classes used for spawn bookkeeping and observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Timers and other work whose completion is directly visible to the user.
	Interactive,
	/// Network fetches whose results may be discarded when superseded.
	Background,
}

impl TaskClass {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Interactive => "interactive",
			Self::Background => "background",
		}
	}
}
