/// Command surface of an external frame-based animation player (for example a Lottie asset).
///
/// Frames are absolute indices into the asset. The host reports playback completion separately.
pub trait AnimationPlayer {
    fn play(&mut self);
    fn stop(&mut self);
    /// Play frames `start..=end`, repeating when `looping`.
    fn play_segment(&mut self, start: u32, end: u32, looping: bool);
    fn seek_and_hold(&mut self, frame: u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerCommand {
    Play,
    Stop,
    PlaySegment { start: u32, end: u32, looping: bool },
    SeekAndHold { frame: u32 },
}

/// Player that records the commands it receives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandLog {
    commands: Vec<PlayerCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    pub fn last(&self) -> Option<&PlayerCommand> {
        self.commands.last()
    }

    /// Drain everything recorded so far.
    pub fn take(&mut self) -> Vec<PlayerCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl AnimationPlayer for CommandLog {
    fn play(&mut self) {
        self.commands.push(PlayerCommand::Play);
    }

    fn stop(&mut self) {
        self.commands.push(PlayerCommand::Stop);
    }

    fn play_segment(&mut self, start: u32, end: u32, looping: bool) {
        self.commands.push(PlayerCommand::PlaySegment {
            start,
            end,
            looping,
        });
    }

    fn seek_and_hold(&mut self, frame: u32) {
        self.commands.push(PlayerCommand::SeekAndHold { frame });
    }
}

impl<P: AnimationPlayer + ?Sized> AnimationPlayer for Box<P> {
    fn play(&mut self) {
        (**self).play();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn play_segment(&mut self, start: u32, end: u32, looping: bool) {
        (**self).play_segment(start, end, looping);
    }

    fn seek_and_hold(&mut self, frame: u32) {
        (**self).seek_and_hold(frame);
    }
}
