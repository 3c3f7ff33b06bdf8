// src/framebuffer/tests.rs

use super::*;
use crate::error::SurfaceError;
use test_log::test;

fn surface(format: PixelFormat, width: usize, height: usize) -> FrameBuffer<Vec<u8>> {
    let (_, len) = format.layout(width, height, None).unwrap();
    let buf = vec![0u8; len];
    FrameBuffer::new(buf, width, height, format, None).unwrap()
}

fn gs8_from(width: usize, height: usize, pixels: &[u8]) -> FrameBuffer<Vec<u8>> {
    FrameBuffer::new(pixels.to_vec(), width, height, PixelFormat::Gs8, None).unwrap()
}

/// Every lit pixel of a GS8 surface, row by row.
fn lit(fb: &FrameBuffer<Vec<u8>>) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for y in 0..fb.height() as i32 {
        for x in 0..fb.width() as i32 {
            if fb.pixel(x, y) != Some(0) {
                out.push((x, y));
            }
        }
    }
    out
}

/// Pixel coordinates of every `#` in a picture, row by row.
fn art(rows: &[&str]) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '#' {
                out.push((x as i32, y as i32));
            }
        }
    }
    out
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_unknown_format_code_is_rejected() {
    let result = FrameBuffer::with_format_code(vec![0u8; 64], 8, 8, 9, None);
    assert_eq!(result.unwrap_err(), SurfaceError::UnknownFormat(9));
}

#[test]
fn test_short_buffer_is_rejected() {
    let err = FrameBuffer::new(vec![0u8; 7], 8, 8, PixelFormat::MonoVlsb, None).unwrap_err();
    assert!(matches!(
        err,
        SurfaceError::BufferTooSmall {
            required: 8,
            actual: 7,
            ..
        }
    ));
}

#[test]
fn test_oversized_surface_is_rejected() {
    let err =
        FrameBuffer::new(vec![0u8; 16], usize::MAX / 2, 3, PixelFormat::Gs8, None).unwrap_err();
    assert!(matches!(err, SurfaceError::TooLarge { height: 3, .. }));

    let err = FrameBuffer::new(vec![0u8; 16], 4, 4, PixelFormat::MonoHmsb, Some(usize::MAX))
        .unwrap_err();
    assert!(matches!(err, SurfaceError::TooLarge { .. }));
}

#[test]
fn test_stride_defaults_to_width_and_rounds_up() {
    let fb = FrameBuffer::new(vec![0u8; 16], 10, 8, PixelFormat::MonoHlsb, None).unwrap();
    assert_eq!(fb.stride(), 16);

    let fb = FrameBuffer::new(vec![0u8; 64], 5, 5, PixelFormat::Gs8, Some(7)).unwrap();
    assert_eq!(fb.stride(), 7);
}

#[test]
fn test_from_config() {
    let config = SurfaceConfig {
        width: 6,
        height: 2,
        format: PixelFormat::Gs4Hlsb,
        stride: None,
    };
    let fb = FrameBuffer::from_config(vec![0u8; config.buffer_len().unwrap()], &config).unwrap();
    assert_eq!((fb.width(), fb.height(), fb.stride()), (6, 2, 6));
    assert_eq!(fb.format(), PixelFormat::Gs4Hlsb);
}

#[test]
fn test_buffer_view_covers_surface_only() {
    let mut fb = FrameBuffer::new(vec![0u8; 100], 8, 8, PixelFormat::Gs8, None).unwrap();
    assert_eq!(fb.byte_len(), 64);
    assert_eq!(fb.buffer().len(), 64);
    fb.buffer_mut()[0] = 9;
    assert_eq!(fb.pixel(0, 0), Some(9));
    assert_eq!(fb.into_inner().len(), 100);
}

#[test]
fn test_borrowed_buffer() {
    let mut storage = [0u8; 32];
    {
        let mut fb = FrameBuffer::new(&mut storage[..], 4, 4, PixelFormat::Rgb565, None).unwrap();
        fb.set_pixel(1, 0, 0xABCD);
    }
    assert_eq!(&storage[2..4], &[0xCD, 0xAB]);
}

// =============================================================================
// Pixels and fills
// =============================================================================

#[test]
fn test_mono_fill_rect_scenario() {
    let mut fb = surface(PixelFormat::MonoVlsb, 8, 8);
    fb.fill_rect(0, 0, 8, 8, 1);
    assert_eq!(fb.pixel(3, 3), Some(1));
    assert_eq!(fb.pixel(0, 0), Some(1));
}

#[test]
fn test_rgb565_pixel_scenario() {
    let mut fb = surface(PixelFormat::Rgb565, 8, 8);
    fb.set_pixel(5, 5, 0xF800);
    assert_eq!(fb.pixel(5, 5), Some(0xF800));
}

#[test]
fn test_out_of_bounds_pixels_are_ignored() {
    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    fb.set_pixel(-1, 0, 1);
    fb.set_pixel(4, 0, 1);
    fb.set_pixel(0, 4, 1);
    fb.masked_set(1, 1, 1, false);
    assert!(fb.buffer().iter().all(|&b| b == 0));
    assert_eq!(fb.pixel(4, 0), None);
    assert_eq!(fb.pixel(0, -1), None);

    fb.masked_set(1, 1, 5, true);
    assert_eq!(fb.pixel(1, 1), Some(5));
}

#[test]
fn test_fill_rect_touches_only_its_rectangle() {
    for format in PixelFormat::ALL {
        let mut fb = surface(format, 13, 11);
        let color = format.max_color();
        fb.fill_rect(2, 3, 7, 5, color);
        for y in 0..11 {
            for x in 0..13 {
                let inside = (2..9).contains(&x) && (3..8).contains(&y);
                let expected = if inside { color } else { 0 };
                assert_eq!(fb.pixel(x, y), Some(expected), "{format:?} ({x},{y})");
            }
        }
    }
}

#[test]
fn test_fill_rect_clips_and_ignores_degenerate() {
    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    fb.fill_rect(-2, -2, 4, 4, 1);
    assert_eq!(lit(&fb), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);

    let before = fb.buffer().to_vec();
    fb.fill_rect(0, 0, 0, 4, 2);
    fb.fill_rect(0, 0, 4, -1, 2);
    fb.fill_rect(4, 0, 2, 2, 2);
    fb.fill_rect(i32::MAX, i32::MAX, i32::MAX, i32::MAX, 2);
    assert_eq!(fb.buffer(), &before[..]);
}

#[test]
fn test_fill_whole_surface() {
    let mut fb = surface(PixelFormat::Gs2Hmsb, 6, 3);
    fb.fill(2);
    assert!((0..3).all(|y| (0..6).all(|x| fb.pixel(x, y) == Some(2))));
}

#[test]
fn test_hline_vline() {
    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    fb.hline(1, 0, 2, 1);
    fb.vline(3, 2, 5, 1);
    assert_eq!(lit(&fb), vec![(1, 0), (2, 0), (3, 2), (3, 3)]);
}

#[test]
fn test_rect_outline_and_fill() {
    let mut fb = surface(PixelFormat::Gs8, 5, 5);
    fb.rect(0, 0, 3, 3, 1, false);
    assert_eq!(
        lit(&fb),
        vec![(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
    );

    fb.rect(0, 0, 3, 3, 1, true);
    assert_eq!(fb.pixel(1, 1), Some(1));
}

// =============================================================================
// Lines
// =============================================================================

#[test]
fn test_zero_length_line_is_one_pixel() {
    let mut fb = surface(PixelFormat::Gs8, 5, 5);
    fb.line(2, 3, 2, 3, 1);
    assert_eq!(lit(&fb), vec![(2, 3)]);
}

#[test]
fn test_horizontal_line_includes_both_endpoints() {
    let mut fb = surface(PixelFormat::Gs8, 5, 1);
    fb.line(3, 0, 0, 0, 1);
    assert_eq!(lit(&fb), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
}

#[test]
fn test_diagonal_and_steep_lines() {
    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    fb.line(0, 0, 3, 3, 1);
    assert_eq!(lit(&fb), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);

    let mut fb = surface(PixelFormat::Gs8, 2, 4);
    fb.line(0, 0, 0, 3, 1);
    assert_eq!(lit(&fb), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
}

#[test]
fn test_line_clips_to_surface() {
    let mut fb = surface(PixelFormat::Gs8, 3, 3);
    fb.line(-5, 1, 10, 1, 1);
    assert_eq!(lit(&fb), vec![(0, 1), (1, 1), (2, 1)]);
}

// =============================================================================
// Ellipses
// =============================================================================

#[test]
fn test_zero_radius_ellipse_is_a_point() {
    let mut fb = surface(PixelFormat::Gs8, 5, 5);
    fb.ellipse(2, 2, 0, 0, 1, false, Quadrants::ALL);
    assert_eq!(lit(&fb), vec![(2, 2)]);
}

#[test]
fn test_circle_outline_hits_axis_extremes() {
    let mut fb = surface(PixelFormat::Gs8, 11, 11);
    fb.ellipse(5, 5, 3, 3, 1, false, Quadrants::ALL);
    for (x, y) in [(8, 5), (2, 5), (5, 2), (5, 8)] {
        assert_eq!(fb.pixel(x, y), Some(1), "({x},{y})");
    }
    assert_eq!(fb.pixel(5, 5), Some(0));
}

#[test]
fn test_single_quadrant_stays_upper_right() {
    let mut fb = surface(PixelFormat::Gs8, 11, 11);
    fb.ellipse(5, 5, 4, 3, 1, false, Quadrants::Q1);
    let pixels = lit(&fb);
    assert!(!pixels.is_empty());
    assert!(pixels.iter().all(|&(x, y)| x >= 5 && y <= 5));
}

#[test]
fn test_filled_ellipse_spans_centre_row() {
    let mut fb = surface(PixelFormat::Gs8, 11, 11);
    fb.ellipse(5, 5, 3, 2, 1, true, Quadrants::default());
    for x in 2..=8 {
        assert_eq!(fb.pixel(x, 5), Some(1));
    }
    assert_eq!(fb.pixel(1, 5), Some(0));
    assert_eq!(fb.pixel(9, 5), Some(0));
}

#[test]
fn test_negative_radius_draws_nothing() {
    let mut fb = surface(PixelFormat::Gs8, 5, 5);
    fb.ellipse(2, 2, -1, 2, 1, true, Quadrants::ALL);
    assert!(lit(&fb).is_empty());
}

// =============================================================================
// Polygons
// =============================================================================

#[test]
fn test_oversized_radii_are_skipped() {
    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    fb.ellipse(0, 0, i32::MAX, i32::MAX, 1, false, Quadrants::ALL);
    fb.ellipse(2, 2, i32::MAX, 0, 1, true, Quadrants::ALL);
    fb.ellipse(1, 1, 0, i32::MAX, 1, false, Quadrants::ALL);
    assert!(lit(&fb).is_empty());
}

#[test]
fn test_large_circle_top_is_flat_near_apex() {
    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    fb.ellipse(0, 100_000, 100_000, 100_000, 1, false, Quadrants::ALL);
    assert_eq!(lit(&fb), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
}

#[test]
fn test_filled_square() {
    let mut fb = surface(PixelFormat::Gs8, 8, 8);
    fb.polygon(1, 1, &[(0, 0), (4, 0), (4, 4), (0, 4)], 1, true);
    for y in 0..8 {
        for x in 0..8 {
            let inside = (1..6).contains(&x) && (1..6).contains(&y);
            assert_eq!(fb.pixel(x, y), Some(inside as u32), "({x},{y})");
        }
    }
}

#[test]
fn test_filled_triangle_with_single_bottom_vertex() {
    let mut fb = surface(PixelFormat::Gs8, 6, 6);
    fb.polygon(0, 0, &[(0, 0), (4, 0), (2, 4)], 1, true);
    // The apex row has no crossings left once lower endpoints are
    // excluded, so it comes from the vertex patch alone.
    assert_eq!(
        lit(&fb),
        art(&[
            "#####.",
            ".####.",
            ".###..",
            "..##..",
            "..#...",
            "......",
        ])
    );
}

#[test]
fn test_filled_concave_arrow() {
    let mut fb = surface(PixelFormat::Gs8, 8, 6);
    fb.polygon(1, 0, &[(0, 0), (3, 4), (6, 0), (3, 2)], 1, true);
    // Row 0 holds two isolated local extrema; row 2 passes through the
    // reflex vertex.
    assert_eq!(
        lit(&fb),
        art(&[
            ".#.....#",
            "..##..#.",
            "...####.",
            "...###..",
            "....#...",
            "........",
        ])
    );
}

#[test]
fn test_filled_w_pairs_sorted_crossings() {
    let mut fb = surface(PixelFormat::Gs8, 9, 5);
    fb.polygon(0, 0, &[(0, 0), (2, 4), (4, 1), (6, 4), (8, 0)], 1, true);
    assert_eq!(
        lit(&fb),
        art(&[
            "#########",
            ".########",
            ".###.###.",
            "..##.###.",
            "..#...#..",
        ])
    );
}

#[test]
fn test_filled_trapezoid_draws_horizontal_edges() {
    let mut fb = surface(PixelFormat::Gs8, 7, 5);
    fb.polygon(0, 0, &[(1, 0), (5, 0), (6, 4), (0, 4)], 1, true);
    assert_eq!(
        lit(&fb),
        art(&[
            ".#####.",
            ".#####.",
            ".######",
            "#######",
            "#######",
        ])
    );
}

#[test]
fn test_filled_polygon_with_extreme_vertices() {
    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    let vertices = [(i32::MIN, i32::MIN), (i32::MAX, 0), (0, i32::MAX)];
    fb.polygon(0, 0, &vertices, 1, true);
    assert_eq!(lit(&fb).len(), 16);

    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    fb.polygon(-3, 2, &vertices, 1, true);
    assert_eq!(lit(&fb).len(), 16);
}

#[test]
fn test_triangle_outline_reaches_vertices() {
    let mut fb = surface(PixelFormat::Gs8, 6, 6);
    fb.polygon(0, 0, &[(0, 0), (4, 0), (0, 4)], 1, false);
    for (x, y) in [(0, 0), (4, 0), (0, 4), (2, 0), (0, 2), (2, 2)] {
        assert_eq!(fb.pixel(x, y), Some(1), "({x},{y})");
    }
    assert_eq!(fb.pixel(1, 1), Some(0));
}

#[test]
fn test_empty_polygon_is_a_no_op() {
    let mut fb = surface(PixelFormat::Gs8, 4, 4);
    fb.polygon(0, 0, &[], 1, true);
    fb.polygon(0, 0, &[], 1, false);
    assert!(lit(&fb).is_empty());
}

// =============================================================================
// Blit and scroll
// =============================================================================

#[test]
fn test_blit_fully_off_left_is_a_no_op() {
    let mut dst = surface(PixelFormat::Gs8, 8, 4);
    dst.fill(3);
    let before = dst.buffer().to_vec();
    let src = gs8_from(2, 2, &[1, 2, 3, 4]);
    dst.blit(&src, -10, 0, None);
    assert_eq!(dst.buffer(), &before[..]);
}

#[test]
fn test_blit_skips_key() {
    let mut dst = surface(PixelFormat::Gs8, 4, 4);
    let src = gs8_from(2, 2, &[1, 2, 3, 4]);
    dst.blit(&src, 1, 1, Some(2));
    assert_eq!(dst.pixel(1, 1), Some(1));
    assert_eq!(dst.pixel(2, 1), Some(0));
    assert_eq!(dst.pixel(1, 2), Some(3));
    assert_eq!(dst.pixel(2, 2), Some(4));
}

#[test]
fn test_blit_clips_partially_visible_source() {
    let mut dst = surface(PixelFormat::Gs8, 4, 4);
    let src = gs8_from(3, 3, &[7; 9]);
    dst.blit(&src, -1, -1, None);
    assert_eq!(lit(&dst), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
}

#[test]
fn test_blit_across_formats_copies_raw_values() {
    let mut dst = surface(PixelFormat::Rgb565, 2, 1);
    let mut src = surface(PixelFormat::MonoHmsb, 2, 1);
    src.set_pixel(1, 0, 1);
    dst.blit(&src, 0, 0, None);
    assert_eq!(dst.pixel(0, 0), Some(0));
    assert_eq!(dst.pixel(1, 0), Some(1));
}

#[test]
fn test_blit_through_palette() {
    let palette = gs8_from(4, 1, &[10, 20, 30, 40]);
    let mut src = surface(PixelFormat::Gs2Hmsb, 2, 1);
    src.set_pixel(0, 0, 1);
    src.set_pixel(1, 0, 3);

    let mut dst = surface(PixelFormat::Gs8, 2, 1);
    dst.blit_with_palette(&src, 0, 0, None, &palette);
    assert_eq!(lit(&dst), vec![(0, 0), (1, 0)]);
    assert_eq!(dst.buffer(), &[20, 40]);

    let mut keyed = surface(PixelFormat::Gs8, 2, 1);
    keyed.blit_with_palette(&src, 0, 0, Some(20), &palette);
    assert_eq!(keyed.buffer(), &[0, 40]);
}

#[test]
fn test_scroll_zero_is_identity() {
    for format in PixelFormat::ALL {
        let mut fb = surface(format, 9, 9);
        for (i, byte) in fb.buffer_mut().iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(37);
        }
        let before = fb.buffer().to_vec();
        fb.scroll(0, 0);
        assert_eq!(fb.buffer(), &before[..], "{format:?}");
    }
}

#[test]
fn test_scroll_horizontal_leaves_vacated_column() {
    let mut fb = gs8_from(4, 1, &[1, 2, 3, 4]);
    fb.scroll(1, 0);
    assert_eq!(fb.buffer(), &[1, 1, 2, 3]);

    let mut fb = gs8_from(4, 1, &[1, 2, 3, 4]);
    fb.scroll(-1, 0);
    assert_eq!(fb.buffer(), &[2, 3, 4, 4]);
}

#[test]
fn test_scroll_vertical() {
    let mut fb = gs8_from(1, 3, &[1, 2, 3]);
    fb.scroll(0, 1);
    assert_eq!(fb.buffer(), &[1, 1, 2]);

    let mut fb = gs8_from(1, 3, &[1, 2, 3]);
    fb.scroll(0, -2);
    assert_eq!(fb.buffer(), &[3, 2, 3]);
}

#[test]
fn test_scroll_past_surface_is_a_no_op() {
    let mut fb = gs8_from(3, 1, &[1, 2, 3]);
    fb.scroll(3, 0);
    fb.scroll(-5, 0);
    assert_eq!(fb.buffer(), &[1, 2, 3]);
}
