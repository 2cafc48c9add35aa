//! Direct2D popup rendering.
//!
//! Draws a rounded, bordered box with wrapped DirectWrite text into a
//! 32-bit DIB and hands it to `UpdateLayeredWindow`, which gives per-pixel
//! alpha around the rounded corners. Everything is laid out in physical
//! pixels: the render target runs at 96 DPI and sizes are pre-scaled.

use windows::core::{w, HSTRING};
use windows::Win32::Foundation::{COLORREF, HWND, POINT, RECT, SIZE};
use windows::Win32::Graphics::Direct2D::Common::{
    D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_COLOR_F, D2D1_PIXEL_FORMAT, D2D_RECT_F,
};
use windows::Win32::Graphics::Direct2D::{
    ID2D1DCRenderTarget, ID2D1Factory, ID2D1RenderTarget, D2D1_ANTIALIAS_MODE_PER_PRIMITIVE,
    D2D1_DRAW_TEXT_OPTIONS_CLIP, D2D1_RENDER_TARGET_PROPERTIES, D2D1_RENDER_TARGET_TYPE_DEFAULT,
    D2D1_RENDER_TARGET_USAGE_NONE, D2D1_ROUNDED_RECT, D2D1_TEXT_ANTIALIAS_MODE_GRAYSCALE,
};
use windows::Win32::Graphics::DirectWrite::{
    IDWriteFactory, IDWriteTextLayout, DWRITE_FONT_STRETCH_NORMAL, DWRITE_FONT_STYLE_NORMAL,
    DWRITE_FONT_WEIGHT_NORMAL, DWRITE_TEXT_METRICS, DWRITE_WORD_WRAPPING_WRAP,
};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    BITMAPINFO, BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION, DIB_RGB_COLORS,
};
use windows::Win32::UI::WindowsAndMessaging::{UpdateLayeredWindow, ULW_ALPHA};
use windows_numerics::Vector2;

use crate::error::PopupError;
use crate::model::{Color, PopupConfig, Rect, Size};

/// Physical-pixel paddings and border for one popup style.
struct Metrics {
    pad_x: f32,
    pad_y: f32,
    border: f32,
    radius: f32,
    max_text_width: f32,
}

impl Metrics {
    fn new(config: &PopupConfig, scale: f32) -> Self {
        Self {
            pad_x: config.padding_x as f32 * scale,
            pad_y: config.padding_y as f32 * scale,
            border: config.border_width * scale,
            radius: config.corner_radius * scale,
            max_text_width: config.max_text_width * scale,
        }
    }

    fn inset_x(&self) -> f32 {
        self.border + self.pad_x
    }

    fn inset_y(&self) -> f32 {
        self.border + self.pad_y
    }
}

fn to_d2d(color: Color) -> D2D1_COLOR_F {
    D2D1_COLOR_F {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

unsafe fn text_layout(
    dwrite: &IDWriteFactory,
    text: &str,
    config: &PopupConfig,
    scale: f32,
    max_width: f32,
) -> windows::core::Result<IDWriteTextLayout> {
    let format = dwrite.CreateTextFormat(
        &HSTRING::from(config.font_family.as_str()),
        None,
        DWRITE_FONT_WEIGHT_NORMAL,
        DWRITE_FONT_STYLE_NORMAL,
        DWRITE_FONT_STRETCH_NORMAL,
        config.font_size_dips() * scale,
        w!("nb-no"),
    )?;
    format.SetWordWrapping(DWRITE_WORD_WRAPPING_WRAP)?;
    let utf16: Vec<u16> = text.encode_utf16().collect();
    dwrite.CreateTextLayout(&utf16, &format, max_width.max(1.0), f32::MAX)
}

/// Outer pixel size of a popup showing `text`.
pub fn measure(dwrite: &IDWriteFactory, text: &str, config: &PopupConfig, scale: f32) -> Size {
    let m = Metrics::new(config, scale);
    let measured = unsafe {
        text_layout(dwrite, text, config, scale, m.max_text_width).and_then(|layout| {
            let mut metrics = DWRITE_TEXT_METRICS::default();
            layout.GetMetrics(&mut metrics)?;
            Ok((metrics.widthIncludingTrailingWhitespace, metrics.height))
        })
    };
    let (text_w, text_h) = measured.unwrap_or_else(|err| {
        tracing::warn!("Text measurement failed, estimating: {err}");
        estimate_text(text, config, scale, m.max_text_width)
    });

    Size::new(
        (text_w.ceil() + 2.0 * m.inset_x()).ceil() as i32,
        (text_h.ceil() + 2.0 * m.inset_y()).ceil() as i32,
    )
}

/// Rough monospace estimate used only when DirectWrite fails.
fn estimate_text(text: &str, config: &PopupConfig, scale: f32, max_width: f32) -> (f32, f32) {
    let char_w = config.font_size_dips() * scale * 0.6;
    let line_h = config.font_size_dips() * scale * 1.3;
    let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f32;
    let lines = text.lines().count().max(1) as f32;
    ((widest * char_w).min(max_width), lines * line_h)
}

/// Paint the popup into `hwnd` at `bounds`.
pub fn render(
    hwnd: HWND,
    d2d: &ID2D1Factory,
    dwrite: &IDWriteFactory,
    text: &str,
    bounds: &Rect,
    config: &PopupConfig,
    scale: f32,
) -> Result<(), PopupError> {
    let width = bounds.width().max(1);
    let height = bounds.height().max(1);
    let m = Metrics::new(config, scale);

    unsafe {
        let screen_dc = GetDC(None);
        let mem_dc = CreateCompatibleDC(Some(screen_dc));

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height, // Top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
        let bitmap = match CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) {
            Ok(bitmap) if !bits.is_null() => bitmap,
            Ok(bitmap) => {
                let _ = DeleteObject(bitmap.into());
                ReleaseDC(None, screen_dc);
                let _ = DeleteDC(mem_dc);
                return Err(PopupError::Render("DIB section has no pixels".into()));
            }
            Err(err) => {
                ReleaseDC(None, screen_dc);
                let _ = DeleteDC(mem_dc);
                return Err(PopupError::Render(err.to_string()));
            }
        };
        let old_bitmap = SelectObject(mem_dc, bitmap.into());

        let drawn = draw(d2d, dwrite, mem_dc, text, width, height, config, &m, scale);

        let result = drawn.and_then(|()| {
            let pt_src = POINT { x: 0, y: 0 };
            let size = SIZE {
                cx: width,
                cy: height,
            };
            let pt_dst = POINT {
                x: bounds.left,
                y: bounds.top,
            };
            let blend = BLENDFUNCTION {
                BlendOp: 0,
                BlendFlags: 0,
                SourceConstantAlpha: 255,
                AlphaFormat: 1,
            };
            UpdateLayeredWindow(
                hwnd,
                Some(screen_dc),
                Some(&pt_dst),
                Some(&size),
                Some(mem_dc),
                Some(&pt_src),
                COLORREF(0),
                Some(&blend),
                ULW_ALPHA,
            )
            .map_err(|err| PopupError::Render(err.to_string()))
        });

        SelectObject(mem_dc, old_bitmap);
        let _ = DeleteObject(bitmap.into());
        let _ = DeleteDC(mem_dc);
        ReleaseDC(None, screen_dc);

        result
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn draw(
    d2d: &ID2D1Factory,
    dwrite: &IDWriteFactory,
    mem_dc: windows::Win32::Graphics::Gdi::HDC,
    text: &str,
    width: i32,
    height: i32,
    config: &PopupConfig,
    m: &Metrics,
    scale: f32,
) -> Result<(), PopupError> {
    let render_err = |err: windows::core::Error| PopupError::Render(err.to_string());

    let rt_props = D2D1_RENDER_TARGET_PROPERTIES {
        r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
        pixelFormat: D2D1_PIXEL_FORMAT {
            format: DXGI_FORMAT_B8G8R8A8_UNORM,
            alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
        },
        dpiX: 96.0,
        dpiY: 96.0,
        usage: D2D1_RENDER_TARGET_USAGE_NONE,
        minLevel: Default::default(),
    };
    let dc_rt: ID2D1DCRenderTarget = d2d.CreateDCRenderTarget(&rt_props).map_err(render_err)?;
    let rect = RECT {
        left: 0,
        top: 0,
        right: width,
        bottom: height,
    };
    dc_rt.BindDC(mem_dc, &rect).map_err(render_err)?;
    let rt: ID2D1RenderTarget = dc_rt.into();

    let (w, h) = (width as f32, height as f32);
    let text_width = (w - 2.0 * m.inset_x()).max(1.0);
    let layout = text_layout(dwrite, text, config, scale, text_width).map_err(render_err)?;

    let background = rt
        .CreateSolidColorBrush(&to_d2d(config.background), None)
        .map_err(render_err)?;
    let border = rt
        .CreateSolidColorBrush(&to_d2d(config.border), None)
        .map_err(render_err)?;
    let foreground = rt
        .CreateSolidColorBrush(&to_d2d(config.foreground), None)
        .map_err(render_err)?;

    // The stroke is centred on the path, so inset by half its width.
    let half = m.border / 2.0;
    let shape = D2D1_ROUNDED_RECT {
        rect: D2D_RECT_F {
            left: half,
            top: half,
            right: w - half,
            bottom: h - half,
        },
        radiusX: m.radius,
        radiusY: m.radius,
    };

    rt.BeginDraw();
    rt.Clear(Some(&D2D1_COLOR_F {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    }));
    rt.SetAntialiasMode(D2D1_ANTIALIAS_MODE_PER_PRIMITIVE);
    // ClearType needs an opaque destination.
    rt.SetTextAntialiasMode(D2D1_TEXT_ANTIALIAS_MODE_GRAYSCALE);

    rt.FillRoundedRectangle(&shape, &background);
    if m.border > 0.0 {
        rt.DrawRoundedRectangle(&shape, &border, m.border, None);
    }
    rt.DrawTextLayout(
        Vector2::new(m.inset_x(), m.inset_y()),
        &layout,
        &foreground,
        D2D1_DRAW_TEXT_OPTIONS_CLIP,
    );

    rt.EndDraw(None, None).map_err(render_err)
}
