//! 启动期种子数据：板块与积分商店商品，按名字幂等插入。

use crate::entities::categories::{
    FREE_CATEGORY_NAME, INFO_CATEGORY_NAME, NOTICE_CATEGORY_NAME, VERIFICATION_CATEGORY_NAME,
};
use crate::entities::{category_entity as categories, point_item_entity as point_items};
use crate::error::AppResult;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

const EMOJI_BASE_URL: &str = "https://braincleaner-images.s3.ap-northeast-2.amazonaws.com";

pub async fn seed_all(pool: &DatabaseConnection) -> AppResult<()> {
    seed_categories(pool).await?;
    seed_point_items(pool).await?;
    Ok(())
}

async fn seed_categories(pool: &DatabaseConnection) -> AppResult<()> {
    for name in [
        VERIFICATION_CATEGORY_NAME,
        INFO_CATEGORY_NAME,
        FREE_CATEGORY_NAME,
        NOTICE_CATEGORY_NAME,
    ] {
        let exists = categories::Entity::find()
            .filter(categories::Column::CategoryName.eq(name))
            .one(pool)
            .await?;
        if exists.is_none() {
            categories::ActiveModel {
                category_name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(pool)
            .await?;
            log::info!("Seeded category: {name}");
        }
    }
    Ok(())
}

async fn seed_point_items(pool: &DatabaseConnection) -> AppResult<()> {
    // (名称, 描述, 售价, 表情码, 图片路径)
    let items: [(&str, &str, i32, &str, &str); 31] = [
        ("brain", "brain", 200, ":brain:", "/emojis/brain.gif"),
        ("리듬 타는 커비", "리듬 타는 커비입니다.", 200, ":kirbyjam:", "/emojis/kirby_jam.gif"),
        ("huhcat", "huh?", 300, ":huhcat:", "/emojis/huh.gif"),
        ("zeus", "식빵 굽는 제우스", 50, ":zeus:", "/emojis/zeus.png"),
        ("mild-panic-intensified", "당황;;", 100, ":panic:", "/emojis/mild-panic-intensifies.gif"),
        ("catjam", "catjam", 200, ":catjam:", "/emojis/catjam.gif"),
        ("crycat", "crycat", 100, ":crycat:", "/emojis/crycat.png"),
        ("facepalm", "facepalm", 200, ":facepalm:", "/emojis/facepalm.gif"),
        ("whew", "whew", 200, ":whew:", "/emojis/whew.gif"),
        ("headbang", "headbang", 200, ":headbang:", "/emojis/headbang.gif"),
        ("merongcat", "merongcat", 100, ":merongcat:", "/emojis/merongcat.png"),
        ("10-10", "10 out of 10", 150, ":ten-ten:", "/emojis/10-outof-10.gif"),
        ("goodluck", "행운의 클로버", 150, ":goodluck:", "/emojis/goodluck.gif"),
        ("god", "3대 500 개", 100, ":god:", "/emojis/god.png"),
        ("현타", "정신 단디 잡으세요", 100, ":feels:", "/emojis/feels.png"),
        ("cool dog", "나는 멋쟁이", 200, ":cooldog:", "/emojis/cool-doge.gif"),
        ("박수", "응원의 박수", 100, ":clap:", "/emojis/clapping.gif"),
        ("비상등", "조심하세요", 150, ":alert:", "/emojis/alert.gif"),
        ("뽀뽀냥이", "쪽!", 200, ":bbobbocat:", "/emojis/bbobbocat.jpg"),
        ("맑눈광", "맑은 눈의 광인", 150, ":malknun:", "/emojis/malknunguang.jpg"),
        ("sob", "광광", 150, ":sob:", "/emojis/sob.png"),
        ("congrats", "심심한 축하의 말씀", 100, ":congrats:", "/emojis/tada.png"),
        ("로켓", "발사!", 100, ":rocket:", "/emojis/rocket.png"),
        ("two hearts", "하트x2", 100, ":twohearts:", "/emojis/two-hearts.gif"),
        ("spinnin' heart", "빙빙 하트", 100, ":revolvinghearts:", "/emojis/revolving-hearts.gif"),
        ("cupid heart", "큐피드 하트", 100, ":heartwarrow:", "/emojis/heart-with-arrow.gif"),
        ("불타는 하트", "할수있다!!!!", 100, ":heartonfire:", "/emojis/heart-on-fire.gif"),
        ("heart beam", "커지는 하트", 100, ":growingheart:", "/emojis/growing-heart.gif"),
        ("heart!", "하트!", 100, ":heart!:", "/emojis/heart-exclamation.gif"),
        ("따봉", "thumbs-up", 50, ":ddabong:", "/emojis/ddabong.gif"),
        ("detoxing", "디톡스 모두모두 화이팅!", 100, ":detox:", "/emojis/detoxing.gif"),
    ];

    for (name, description, price, code, image_path) in items {
        let exists = point_items::Entity::find()
            .filter(point_items::Column::Name.eq(name))
            .one(pool)
            .await?;
        if exists.is_none() {
            point_items::ActiveModel {
                name: Set(name.to_string()),
                description: Set(Some(description.to_string())),
                price: Set(price),
                image_url: Set(Some(full_image_url(image_path))),
                code: Set(Some(code.to_string())),
                ..Default::default()
            }
            .insert(pool)
            .await?;
        }
    }
    Ok(())
}

// 相对路径补全为 S3 绝对路径，已是绝对路径的原样返回
fn full_image_url(path: &str) -> String {
    if path.starts_with("/emojis/") {
        format!("{EMOJI_BASE_URL}{path}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_image_url() {
        assert_eq!(
            full_image_url("/emojis/zeus.png"),
            format!("{EMOJI_BASE_URL}/emojis/zeus.png")
        );
        assert_eq!(full_image_url("https://cdn/x.png"), "https://cdn/x.png");
    }
}
