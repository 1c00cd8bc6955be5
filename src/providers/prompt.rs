use crate::request::AnalysisRequest;

/// The system prompt used for turning a photo or description into a recipe.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECIPE_ANALYST_PROMPT: &str = include_str!("prompt.txt");

/// Build the user turn of a chat request for the given analysis request.
///
/// Text requests become a plain string; image requests become a content array
/// carrying the photo as a `data:` URL labelled with the sniffed image type,
/// JPEG when the format is not recognised.
pub fn build_user_message(request: &AnalysisRequest) -> serde_json::Value {
    match request {
        AnalysisRequest::Text { prompt } => serde_json::json!({
            "role": "user",
            "content": format!("Describe this Indonesian dish as a recipe: {}", prompt.trim())
        }),
        AnalysisRequest::Image { payload } => {
            let mime = request.image_mime().unwrap_or("image/jpeg");
            serde_json::json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "Identify the Indonesian dish in this photo and describe it as a recipe."},
                    {"type": "image_url", "image_url": {"url": format!("data:{};base64,{}", mime, payload.trim())}}
                ]
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!RECIPE_ANALYST_PROMPT.is_empty());
        assert!(RECIPE_ANALYST_PROMPT.contains("cookingTime"));
        assert!(RECIPE_ANALYST_PROMPT.contains("interestingFacts"));
    }

    #[test]
    fn test_text_message() {
        let request = AnalysisRequest::text("Soto ayam soup").unwrap();
        let message = build_user_message(&request);
        assert_eq!(message["role"], "user");
        assert!(message["content"].as_str().unwrap().ends_with("Soto ayam soup"));
    }

    #[test]
    fn test_png_image_is_labelled_png() {
        let request = AnalysisRequest::Image {
            payload: "iVBORw0KGgo=".to_string(),
        };
        let message = build_user_message(&request);
        let url = message["content"][1]["image_url"]["url"].as_str().unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_image_message() {
        let request = AnalysisRequest::Image {
            payload: "YWJj".to_string(),
        };
        let message = build_user_message(&request);
        let url = message["content"][1]["image_url"]["url"].as_str().unwrap();
        assert_eq!(url, "data:image/jpeg;base64,YWJj");
    }
}
