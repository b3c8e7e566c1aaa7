use super::prelude::*;

#[derive(Default)]
pub struct PostQueries;

#[Object]
impl PostQueries {
    /// Community posts, newest first
    #[graphql(guard = "AuthGuard")]
    async fn posts(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
        seller_id: Option<String>,
        status: Option<PostStatus>,
        search: Option<String>,
    ) -> Result<PostPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let filter = PostFilter {
            seller_id,
            status: status.map(|s| s.as_str().to_string()),
            search: search_term(search),
        };
        let page = db.posts().list(filter, request).await.extend()?;
        Ok(PostPage::from_page(page))
    }

    #[graphql(guard = "AuthGuard")]
    async fn post(&self, ctx: &Context<'_>, id: String) -> Result<Post> {
        let db = ctx.data_unchecked::<Database>();
        let post = db.posts().get_by_id(&id).await.extend()?;
        Ok(post.into())
    }
}
