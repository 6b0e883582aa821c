//! Pure surface policy helpers, kept free of GPU handles so they are testable.

use winit::dpi::PhysicalSize;

/// Picks a surface format from the adapter's supported list.
///
/// sRGB formats are preferred when requested; otherwise the first supported
/// format wins. Returns `None` only when the list is empty.
pub(crate) fn pick_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in preferred {
            if formats.contains(&f) {
                return Some(f);
            }
        }
    }

    formats.first().copied()
}

/// Maps a framebuffer size to a configurable surface extent.
///
/// wgpu cannot configure a zero-area surface (e.g. a minimized window);
/// those sizes return `None` and reconfiguration is deferred until the next
/// non-zero resize.
pub(crate) fn surface_extent(size: PhysicalSize<u32>) -> Option<(u32, u32)> {
    if size.width == 0 || size.height == 0 {
        None
    } else {
        Some((size.width, size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wgpu::TextureFormat::{Bgra8Unorm, Bgra8UnormSrgb, Rgba8Unorm, Rgba8UnormSrgb};

    // ── format preference ─────────────────────────────────────────────────

    #[test]
    fn srgb_wins_when_preferred_and_available() {
        let formats = [Bgra8Unorm, Rgba8UnormSrgb, Bgra8UnormSrgb];
        assert_eq!(pick_surface_format(&formats, true), Some(Bgra8UnormSrgb));
    }

    #[test]
    fn first_format_wins_when_srgb_not_preferred() {
        let formats = [Bgra8Unorm, Bgra8UnormSrgb];
        assert_eq!(pick_surface_format(&formats, false), Some(Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_when_no_srgb_available() {
        let formats = [Rgba8Unorm, Bgra8Unorm];
        assert_eq!(pick_surface_format(&formats, true), Some(Rgba8Unorm));
    }

    #[test]
    fn empty_format_list_yields_none() {
        assert_eq!(pick_surface_format(&[], true), None);
    }

    // ── extent policy ─────────────────────────────────────────────────────

    #[test]
    fn nonzero_extent_passes_through_exactly() {
        let size = PhysicalSize::new(800, 600);
        assert_eq!(surface_extent(size), Some((800, 600)));
    }

    #[test]
    fn zero_width_defers_configuration() {
        assert_eq!(surface_extent(PhysicalSize::new(0, 600)), None);
    }

    #[test]
    fn zero_height_defers_configuration() {
        assert_eq!(surface_extent(PhysicalSize::new(800, 0)), None);
    }
}
