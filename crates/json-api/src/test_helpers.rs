//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use till_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        companies::{MockCompaniesService, records::CompanyId},
        orders::MockOrdersService,
        products::MockProductsService,
        stock::MockStockService,
        users::{MockUsersService, records::UserId},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER: AuthenticatedUser = AuthenticatedUser {
    id: UserId::from_i64(7),
    company_id: CompanyId::from_i64(3),
};

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

/// Context whose services reject every call unless a test supplies its own mock.
#[derive(Debug, Default)]
pub(crate) struct Mocks {
    pub(crate) auth: Option<MockAuthService>,
    pub(crate) carts: Option<MockCartsService>,
    pub(crate) orders: Option<MockOrdersService>,
    pub(crate) products: Option<MockProductsService>,
    pub(crate) users: Option<MockUsersService>,
}

impl Mocks {
    fn into_app_context(self) -> AppContext {
        AppContext {
            auth: Arc::new(self.auth.unwrap_or_else(strict_auth_mock)),
            carts: Arc::new(self.carts.unwrap_or_default()),
            orders: Arc::new(self.orders.unwrap_or_default()),
            products: Arc::new(self.products.unwrap_or_default()),
            stock: Arc::new(MockStockService::new()),
            companies: Arc::new(MockCompaniesService::new()),
            users: Arc::new(self.users.unwrap_or_default()),
        }
    }
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(
        Mocks {
            auth: Some(auth),
            ..Mocks::default()
        }
        .into_app_context(),
    )
}

fn authenticated_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(mocks.into_app_context())))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    authenticated_service(
        Mocks {
            carts: Some(carts),
            ..Mocks::default()
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    authenticated_service(
        Mocks {
            orders: Some(orders),
            ..Mocks::default()
        },
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    authenticated_service(
        Mocks {
            products: Some(products),
            ..Mocks::default()
        },
        route,
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    authenticated_service(
        Mocks {
            users: Some(users),
            ..Mocks::default()
        },
        route,
    )
}
