//! gRPC service implementation

use std::sync::Arc;

use catalog_bootstrap::RequestTimer;
use catalog_errors::AppResult;
use tonic::{Request, Response, Status};
use tracing::error;

use crate::application::ProductHandler;
use crate::domain::ProductId;
use crate::proto::product_service_server::ProductService;
use crate::proto::*;

use super::conversions::*;

const SERVICE_NAME: &str = "catalog.products.v1.ProductService";

pub struct ProductServiceImpl {
    handler: Arc<ProductHandler>,
}

impl ProductServiceImpl {
    pub fn new(handler: Arc<ProductHandler>) -> Self {
        Self { handler }
    }

    async fn create(&self, req: CreateProductRequest) -> AppResult<ProductResponse> {
        let product = new_product_from_proto(req)?;
        self.handler.create(product).await.map(product_response)
    }

    async fn find_all(&self, req: FindAllProductsRequest) -> AppResult<FindAllProductsResponse> {
        let pagination = parse_pagination(req.page, req.limit)?;
        self.handler.find_all(pagination).await.map(page_to_proto)
    }

    async fn find_one(&self, req: ProductIdRequest) -> AppResult<ProductResponse> {
        self.handler
            .find_one(ProductId(req.id))
            .await
            .map(product_response)
    }

    async fn update(&self, req: UpdateProductRequest) -> AppResult<ProductResponse> {
        let (id, patch) = update_from_proto(req)?;
        self.handler.update(id, patch).await.map(product_response)
    }

    async fn remove(&self, req: ProductIdRequest) -> AppResult<ProductResponse> {
        self.handler
            .remove(ProductId(req.id))
            .await
            .map(product_response)
    }

    async fn logic_remove(&self, req: ProductIdRequest) -> AppResult<ProductResponse> {
        self.handler
            .logic_remove(ProductId(req.id))
            .await
            .map(product_response)
    }

    async fn validate(&self, req: ValidateProductsRequest) -> AppResult<ValidateProductsResponse> {
        let ids = product_ids_from_proto(req.ids);
        let products = self.handler.validate_products(ids).await?;
        Ok(ValidateProductsResponse {
            products: products.into_iter().map(product_to_proto).collect(),
        })
    }
}

fn respond<T>(timer: RequestTimer, result: AppResult<T>) -> Result<Response<T>, Status> {
    let result = result.map_err(|e| {
        if !e.is_client_error() {
            error!(error = %e, "Request failed");
        }
        Status::from(e)
    });
    timer.observe(result).map(Response::new)
}

#[tonic::async_trait]
impl ProductService for ProductServiceImpl {
    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE_NAME, "CreateProduct");
        respond(timer, self.create(request.into_inner()).await)
    }

    async fn find_all_products(
        &self,
        request: Request<FindAllProductsRequest>,
    ) -> Result<Response<FindAllProductsResponse>, Status> {
        let timer = RequestTimer::new(SERVICE_NAME, "FindAllProducts");
        respond(timer, self.find_all(request.into_inner()).await)
    }

    async fn find_one_product(
        &self,
        request: Request<ProductIdRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE_NAME, "FindOneProduct");
        respond(timer, self.find_one(request.into_inner()).await)
    }

    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE_NAME, "UpdateProduct");
        respond(timer, self.update(request.into_inner()).await)
    }

    async fn remove_product(
        &self,
        request: Request<ProductIdRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE_NAME, "RemoveProduct");
        respond(timer, self.remove(request.into_inner()).await)
    }

    async fn logic_remove_product(
        &self,
        request: Request<ProductIdRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE_NAME, "LogicRemoveProduct");
        respond(timer, self.logic_remove(request.into_inner()).await)
    }

    async fn validate_products(
        &self,
        request: Request<ValidateProductsRequest>,
    ) -> Result<Response<ValidateProductsResponse>, Status> {
        let timer = RequestTimer::new(SERVICE_NAME, "ValidateProducts");
        respond(timer, self.validate(request.into_inner()).await)
    }
}
