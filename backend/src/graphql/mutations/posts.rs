use super::prelude::*;

#[derive(Default)]
pub struct PostMutations;

#[Object]
impl PostMutations {
    #[graphql(guard = "AuthGuard")]
    async fn create_post(&self, ctx: &Context<'_>, input: CreatePostInput) -> Result<Post> {
        let db = ctx.data_unchecked::<Database>();

        require_text(&input.title, "título").extend()?;
        require_text(&input.content, "contenido").extend()?;

        let post = db
            .posts()
            .create(CreatePost {
                seller_id: input.seller_id,
                title: input.title.trim().to_string(),
                content: input.content,
            })
            .await
            .extend()?;
        Ok(post.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_post(&self, ctx: &Context<'_>, id: String, input: UpdatePostInput) -> Result<Post> {
        let db = ctx.data_unchecked::<Database>();

        if let Some(title) = &input.title {
            require_text(title, "título").extend()?;
        }
        if let Some(content) = &input.content {
            require_text(content, "contenido").extend()?;
        }

        let post = db
            .posts()
            .update(
                &id,
                UpdatePost {
                    title: input.title,
                    content: input.content,
                },
            )
            .await
            .extend()?;
        Ok(post.into())
    }

    /// Publish, hide or archive a post
    #[graphql(guard = "AuthGuard")]
    async fn set_post_status(&self, ctx: &Context<'_>, id: String, status: PostStatus) -> Result<Post> {
        let db = ctx.data_unchecked::<Database>();
        let post = db.posts().set_status(&id, status.as_str()).await.extend()?;
        Ok(post.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_post(&self, ctx: &Context<'_>, id: String) -> Result<DeletionResult> {
        let db = ctx.data_unchecked::<Database>();
        db.posts().delete(&id).await.extend()?;
        Ok(DeletionResult::done("Publicación eliminada", id))
    }
}
