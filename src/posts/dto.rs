use serde::Serialize;

/// Echo of the saved adoption post, returned on creation.
#[derive(Debug, Serialize)]
pub struct PostData {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub adopt: String,
    pub phone: String,
    pub price: i64,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub message: &'static str,
    pub data: PostData,
}

/// Listing entry for the adoption board.
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub adopt: String,
    pub phone: String,
    pub price: i64,
    pub image_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_response_echoes_the_saved_record() {
        let json = serde_json::to_string(&CreatePostResponse {
            message: "Data saved successfully!",
            data: PostData {
                name: "Mochi".into(),
                age: 2,
                gender: "male".into(),
                adopt: "available".into(),
                phone: "0812345678".into(),
                price: 0,
                image: Some("uploads/1754400000-abc.jpg".into()),
            },
        })
        .unwrap();
        assert!(json.contains(r#""message":"Data saved successfully!""#));
        assert!(json.contains(r#""image":"uploads/1754400000-abc.jpg""#));
    }
}
