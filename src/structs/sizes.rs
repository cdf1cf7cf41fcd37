/// Edge lengths written into every icon, largest first.
pub const ICON_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

/// The same sizes, smallest first.
pub fn ascending() -> impl Iterator<Item = u32> {
    ICON_SIZES.iter().rev().copied()
}
