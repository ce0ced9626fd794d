//! Screen port - the terminal the command output lands on

/// Abstract terminal display
pub trait Screen {
    /// Wipe the visible terminal before a new run
    fn clear(&mut self) -> std::io::Result<()>;
}
