pub mod classifier_resolver;
pub mod dispatch;
pub mod interface_collector;
pub mod output_set;
pub mod terminal_detector;

pub use classifier_resolver::{ClassifierOutputResolver, ClassifierResolution, ProbabilitySource};
pub use dispatch::output_names;
pub use interface_collector::InterfaceOutputCollector;
pub use output_set::OutputNameSet;
pub use terminal_detector::{TerminalAnalysis, TerminalDetector};
