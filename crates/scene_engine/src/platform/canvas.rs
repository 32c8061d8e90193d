use super::{Canvas, DrawCommand, SpriteSink};

/// Headless canvas recording every submitted command
///
/// The commands of the frame in progress stay readable until the next
/// [`clear`](Canvas::clear).
#[derive(Debug, Clone, Default)]
pub struct DrawQueue {
    commands: Vec<DrawCommand>,
    frames_presented: u64,
    total_submitted: u64,
}

impl DrawQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands submitted since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of presented frames
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Commands submitted over the queue's lifetime
    pub fn total_submitted(&self) -> u64 {
        self.total_submitted
    }
}

impl SpriteSink for DrawQueue {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
        self.total_submitted += 1;
    }
}

impl Canvas for DrawQueue {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn present(&mut self) {
        self.frames_presented += 1;
        log::trace!("Presented frame {} with {} sprites", self.frames_presented, self.commands.len());
    }
}
