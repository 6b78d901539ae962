// Purpose - external interfaces: wav files on disk, audio devices

pub mod playback;
pub mod wav;
