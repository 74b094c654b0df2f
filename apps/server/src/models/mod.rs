//! Domain models: the seller entity, its inputs, pagination and read projections

pub mod pagination;
pub mod projections;
pub mod seller;

pub use pagination::{Page, PageRequest};
pub use projections::{
    GetMySellerInfo, GetSellerByAdminDto, GetSellerForConsumerDto, SellerInfoDetailsDto,
    SellerInfoDto, SellerInfoForAdminDto, SellerInfoForAuctionDto, SellerInfoForConsumerDto,
    SellerMyInfoDto,
};
pub use seller::{
    ApprovalState, ModifySellerInfo, NewSeller, Seller, SellerJudgeRequest, SignUpInfo,
};
