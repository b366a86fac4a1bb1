/// Sun colour from the zenith (index 0) down to the horizon.
/// Applied while the sun's polar angle is below [`MAX_GRADIENT_ANGLE`], mirrored on the way up.
pub const SUN_LIGHT_COLOR_GRADIENT: [[u8; 3]; 20] = [
    [255, 254, 244],
    [255, 254, 243],
    [255, 253, 241],
    [255, 252, 239],
    [255, 251, 236],
    [254, 249, 232],
    [254, 247, 226],
    [254, 244, 218],
    [253, 239, 207],
    [253, 232, 194],
    [253, 224, 178],
    [252, 213, 159],
    [251, 198, 135],
    [251, 180, 106],
    [250, 157, 72],
    [250, 129, 32],
    [231, 97, 4],
    [178, 69, 2],
    [117, 41, 1],
    [47, 15, 0],
];

pub const MAX_GRADIENT_ANGLE: f32 = 100.0;
pub const SUN_AZIMUTH_DEGREES: f32 = 270.0;
pub const SUN_DISTANCE: f32 = 1000.0;

pub const SUN_ILLUMINANCE: f32 = 12_000.0;
pub const AMBIENT_COLOR: [u8; 3] = [192, 187, 255];
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const NIGHT_AMBIENT_BRIGHTNESS: f32 = 40.0;

pub const DAY_SKY_COLOR: [u8; 3] = [126, 176, 230];
pub const NIGHT_SKY_COLOR: [u8; 3] = [8, 10, 26];

pub const LIGHT_OFF_COLOR: [u8; 3] = [102, 129, 134];
pub const LIGHT_ON_COLOR: [u8; 3] = [255, 252, 57];
