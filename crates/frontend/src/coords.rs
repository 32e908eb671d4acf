use citymap_shared::coords::ElementBox;
use wasm_bindgen::JsCast;

/// Convert client (viewport) coordinates to element-relative pixel coordinates.
pub fn client_to_element(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

fn element_by_id(id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

/// Pointer position relative to the element with `id`, plus that element's rendered size.
pub fn pointer_in_element(client_x: f64, client_y: f64, id: &str) -> Option<(f64, f64, ElementBox)> {
    let rect = element_by_id(id)?.get_bounding_client_rect();
    let (x, y) = client_to_element(client_x, client_y, rect.left(), rect.top());
    Some((
        x,
        y,
        ElementBox {
            width: rect.width(),
            height: rect.height(),
        },
    ))
}

/// Natural size of a fully loaded `<img>`. `None` while it is still loading.
pub fn image_natural_size(id: &str) -> Option<(f64, f64)> {
    let img = element_by_id(id)?.dyn_into::<web_sys::HtmlImageElement>().ok()?;
    if !img.complete() || img.natural_width() == 0 {
        return None;
    }
    Some((img.natural_width() as f64, img.natural_height() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_element_origin() {
        let (x, y) = client_to_element(100.0, 200.0, 100.0, 200.0);
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_element_offset() {
        let (x, y) = client_to_element(450.0, 350.0, 320.0, 50.0);
        assert!((x - 130.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }
}
